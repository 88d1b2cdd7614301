//! Repository trait for creator data access.

use crate::domain::entities::Creator;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for creators.
///
/// Creators follow upsert-on-write semantics: any component referencing a
/// creator id may call [`CreatorRepository::upsert`] to guarantee the row
/// exists before linking to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Creates the creator if absent, updates `name` when provided.
    async fn upsert<'a>(&self, creator_id: &str, name: Option<&'a str>)
    -> Result<Creator, AppError>;

    /// Finds a creator by its business key.
    async fn find_by_creator_id(&self, creator_id: &str) -> Result<Option<Creator>, AppError>;
}
