//! Repository trait for campaign/creator link data access.

use crate::domain::entities::{CreatorLink, LinkAttribution, NewCreatorLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for campaign ↔ creator links.
///
/// Links are looked up by three attribution signals (short code, coupon
/// code, utm_content); each lookup returns the owning campaign/creator
/// pair or `None`. Absence of a match is never an error: the attribution
/// chain falls through to the next signal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatorLinkRepository: Send + Sync {
    /// Creates a link for a (campaign, creator) pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the pair is already linked or the
    /// short code is taken.
    async fn create(&self, new_link: NewCreatorLink) -> Result<CreatorLink, AppError>;

    /// Finds a link by its persisted short code.
    async fn find_by_short_code(&self, code: &str) -> Result<Option<CreatorLink>, AppError>;

    /// Resolves a coupon code to its campaign/creator pair.
    async fn find_by_coupon(&self, coupon: &str) -> Result<Option<LinkAttribution>, AppError>;

    /// Resolves a utm_content marker to its campaign/creator pair.
    async fn find_by_utm_content(
        &self,
        utm_content: &str,
    ) -> Result<Option<LinkAttribution>, AppError>;

    /// Lists all links for a campaign, newest first.
    async fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<CreatorLink>, AppError>;

    /// Sets the provisioned coupon code on a (campaign, creator) link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pair is not linked.
    async fn set_coupon(
        &self,
        campaign_id: &str,
        creator_id: &str,
        coupon_code: &str,
    ) -> Result<CreatorLink, AppError>;

    /// Coupon codes provisioned for a campaign, for order correlation.
    async fn coupon_codes_for_campaign(&self, campaign_id: &str)
    -> Result<Vec<String>, AppError>;
}
