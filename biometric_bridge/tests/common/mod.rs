pub mod fixtures;
pub mod platforms;

pub use fixtures::*;
pub use platforms::{FailingKeyStore, ReentrantPlatform, SilentPlatform};
