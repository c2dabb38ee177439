mod stdout;

use async_trait::async_trait;

use crate::menu::MenuModel;
use crate::types::RefreshError;

pub use stdout::StdoutPresenter;

/// Presentation collaborator fed by the refresh scheduler.
///
/// Implementations own the actual status-bar surface; the backend only
/// hands over fully built menu models.
#[async_trait]
pub trait MenuPresenter: Send + Sync {
    /// Show a freshly parsed menu.
    async fn present(&self, menu: &MenuModel);

    /// Signal that refreshes are failing and the visible menu is stale.
    async fn present_stale(&self, consecutive_failures: u32, error: &RefreshError);
}
