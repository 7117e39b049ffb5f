//! String-keyed method calls with JSON arguments, the shape in which a host
//! plugin channel hands requests to the bridge.

mod errors;
mod handlers;
mod types;

pub use errors::{ChannelError, ChannelErrorCode};
pub use handlers::handle_method_call;
pub use types::MethodCall;
