mod core;
mod errors;
mod flow;
mod request;
mod state;

pub use self::core::BiometricAuth;
pub use errors::DispatchError;
pub use request::{AuthenticationRequest, AuthenticationRequestBuilder};
pub use state::DispatchState;
