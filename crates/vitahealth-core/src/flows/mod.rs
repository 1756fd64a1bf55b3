//! Page controllers
//!
//! Each page owns its state and talks to the backend on its own; the only
//! shared state is the session and the key-value store. Controllers expose
//! synchronous transitions plus small async helpers so a host can either
//! await a whole flow (terminal client, tests) or drive the transitions from
//! UI callbacks around its own task spawning (browser).

pub mod detection;
pub mod login;
pub mod planner;
pub mod profile;
pub mod register;

/// Visual tone of a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// Blocking message shown over a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
    pub tone: Tone,
}

impl Modal {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Tone::Success)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Tone::Warning)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Tone::Error)
    }

    fn new(title: impl Into<String>, message: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            tone,
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }
}
