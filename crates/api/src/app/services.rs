//! Service wiring: the process-wide tracker plus request-independent settings.

use chrono::Duration;

use minitrack_infra::Tracker;

use crate::config::ApiConfig;

/// Everything the handlers need, constructed once by the composition root.
#[derive(Debug)]
pub struct AppServices {
    tracker: Tracker,
    app_env: String,
    history_group_window: Option<Duration>,
}

impl AppServices {
    pub fn new(tracker: Tracker, config: &ApiConfig) -> Self {
        Self {
            tracker,
            app_env: config.app_env.clone(),
            history_group_window: config.history_group_window,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn app_env(&self) -> &str {
        &self.app_env
    }

    pub fn history_group_window(&self) -> Option<Duration> {
        self.history_group_window
    }
}
