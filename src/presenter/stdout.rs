//! JSON-over-stdout presenter used by the backend binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::menu::MenuModel;
use crate::types::RefreshError;

use super::MenuPresenter;

/// Serializes each menu (or stale notice) as one JSON line on stdout,
/// where the status-bar frontend picks it up.
#[derive(Debug, Default)]
pub struct StdoutPresenter;

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Envelope<'a> {
    Menu {
        refreshed_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        refresh_anchor: Option<usize>,
        menu: &'a MenuModel,
    },
    Stale {
        at: DateTime<Utc>,
        consecutive_failures: u32,
        error: String,
    },
}

impl StdoutPresenter {
    fn emit(envelope: &Envelope<'_>) {
        match serde_json::to_string(envelope) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(error = ?err, "Failed to serialize menu payload"),
        }
    }
}

#[async_trait]
impl MenuPresenter for StdoutPresenter {
    async fn present(&self, menu: &MenuModel) {
        Self::emit(&Envelope::Menu {
            refreshed_at: Utc::now(),
            refresh_anchor: menu.refresh_anchor(),
            menu,
        });
    }

    async fn present_stale(&self, consecutive_failures: u32, error: &RefreshError) {
        Self::emit(&Envelope::Stale {
            at: Utc::now(),
            consecutive_failures,
            error: error.to_string(),
        });
    }
}
