mod errors;
mod query;
mod types;

pub use errors::CapabilityError;
pub use types::{BiometricKind, CapabilitySnapshot, CapabilityStatus};

pub(crate) use query::{
    available_kinds, capability_snapshot, is_available, is_enrolled, require_ready,
};
