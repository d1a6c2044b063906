//! Scripted [`UserInteraction`] that records everything it is told.

use hoist_services::{ConsolidationPreview, UserInteraction};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Warn(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Info(m) | Notification::Warn(m) | Notification::Error(m) => m,
        }
    }
}

/// Answers prompts from a queue of choices. When the queue runs dry every
/// prompt is answered with the first option.
#[derive(Default)]
pub struct ScriptedInteraction {
    choices: Mutex<VecDeque<Option<usize>>>,
    notifications: Mutex<Vec<Notification>>,
    prompts: Mutex<Vec<String>>,
    previews: Mutex<Vec<ConsolidationPreview>>,
}

impl ScriptedInteraction {
    /// Accept every prompt.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Answer prompts in order with `choices`.
    pub fn with_choices(choices: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            choices: Mutex::new(choices.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn previews(&self) -> Vec<ConsolidationPreview> {
        self.previews.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

impl UserInteraction for ScriptedInteraction {
    fn info(&self, message: &str) {
        self.push(Notification::Info(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.push(Notification::Warn(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }

    fn choose(&self, prompt: &str, _options: &[String]) -> Option<usize> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.choices.lock().unwrap().pop_front().unwrap_or(Some(0))
    }

    fn show_preview(&self, preview: &ConsolidationPreview) {
        self.previews.lock().unwrap().push(preview.clone());
    }
}
