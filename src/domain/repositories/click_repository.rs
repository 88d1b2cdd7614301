//! Repository trait for click fact data access.

use crate::domain::entities::{Click, LinkAttribution, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click facts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click fact. Clicks are immutable once written.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Resolves a click id to the campaign/creator pair that produced it.
    async fn find_attribution(
        &self,
        click_id: &str,
    ) -> Result<Option<LinkAttribution>, AppError>;
}
