//! Mock implementations for testing

use async_trait::async_trait;
use hoist_foundation::HoistResult;
use hoist_services::{ConsolidationPreview, FileSystem, UserInteraction};
use mockall::mock;
use std::path::{Path, PathBuf};

mock! {
    pub Interaction {}

    impl UserInteraction for Interaction {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn choose(&self, prompt: &str, options: &[String]) -> Option<usize>;
        fn show_preview(&self, preview: &ConsolidationPreview);
    }
}

mock! {
    pub FileSystem {}

    #[async_trait]
    impl FileSystem for FileSystem {
        async fn read_to_string(&self, path: &Path) -> HoistResult<String>;
        async fn write(&self, path: &Path, contents: &str) -> HoistResult<()>;
        async fn remove_file(&self, path: &Path) -> HoistResult<()>;
        async fn exists(&self, path: &Path) -> bool;
        async fn is_file(&self, path: &Path) -> bool;
        async fn read_dir(&self, path: &Path) -> HoistResult<Vec<PathBuf>>;
    }
}

/// Create a mock interaction for testing
pub fn mock_interaction() -> MockInteraction {
    MockInteraction::new()
}

/// Create a mock file system for testing
pub fn mock_file_system() -> MockFileSystem {
    MockFileSystem::new()
}
