//! Test support utilities and fixtures for hoist integration tests

pub mod harness;
pub mod mocks;

pub use harness::{FaultyFileSystem, Notification, ScriptedInteraction, TestWorkspace};
