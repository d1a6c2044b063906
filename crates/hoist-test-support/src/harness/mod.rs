//! Harnesses shared by the service integration tests

pub mod filesystem;
pub mod interaction;
pub mod workspace;

pub use filesystem::FaultyFileSystem;
pub use interaction::{Notification, ScriptedInteraction};
pub use workspace::TestWorkspace;
