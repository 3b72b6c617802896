use std::sync::{Mutex, PoisonError};

use crate::models::{CurrentConditions, ForecastDay};

/// What the display region currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    /// Nothing looked up yet
    #[default]
    Idle,
    Loading,
    Success {
        current: CurrentConditions,
        forecast: Vec<ForecastDay>,
    },
    Error(String),
}

impl DisplayState {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Idle => "idle",
            DisplayState::Loading => "loading",
            DisplayState::Success { .. } => "success",
            DisplayState::Error(_) => "error",
        }
    }

    /// `Success` and `Error` end a lookup
    pub fn is_terminal(&self) -> bool {
        matches!(self, DisplayState::Success { .. } | DisplayState::Error(_))
    }
}

/// Receives every display transition of the pipeline
pub trait DisplaySink: Send + Sync {
    fn show(&self, state: &DisplayState);
}

/// The display region: keeps the latest state, replacing whatever was shown before
#[derive(Debug, Default)]
pub struct Screen {
    state: Mutex<DisplayState>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DisplayState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DisplaySink for Screen {
    fn show(&self, state: &DisplayState) {
        let mut current = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!("Display {} -> {}", current.name(), state.name());
        *current = state.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_starts_idle() {
        assert_eq!(Screen::new().current(), DisplayState::Idle);
    }

    #[test]
    fn each_state_replaces_the_previous_one() {
        let screen = Screen::new();
        screen.show(&DisplayState::Error("City not found".into()));
        screen.show(&DisplayState::Loading);
        assert_eq!(screen.current(), DisplayState::Loading);
        assert!(!screen.current().is_terminal());

        screen.show(&DisplayState::Error("Location not found".into()));
        assert_eq!(
            screen.current(),
            DisplayState::Error("Location not found".into())
        );
        assert!(screen.current().is_terminal());
    }
}
