//! Repository trait for campaign data access.

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for campaigns.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Creates a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `campaign_id` already exists.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError>;

    /// Finds a campaign by its business key.
    async fn find_by_campaign_id(&self, campaign_id: &str) -> Result<Option<Campaign>, AppError>;

    /// Lists enabled campaigns, ordered by name.
    async fn list_enabled(&self) -> Result<Vec<Campaign>, AppError>;

    /// Partially updates a campaign. `None` fields are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no campaign matches `campaign_id`.
    async fn update(&self, campaign_id: &str, patch: CampaignPatch) -> Result<Campaign, AppError>;
}
