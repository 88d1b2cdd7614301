//! Short-link resolution service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::domain::repositories::{CampaignRepository, CreatorLinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::click_id::generate_click_id;
use crate::utils::short_code;

/// A short code resolved to its redirect ingredients, before the
/// per-request click id is attached. This is what gets cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub campaign_id: String,
    pub creator_id: Option<String>,
    /// Fully-qualified destination without tracking parameters.
    pub destination: String,
}

/// Final redirect computed for one request.
#[derive(Debug, Clone)]
pub struct Redirect {
    pub campaign_id: String,
    pub creator_id: Option<String>,
    pub click_id: String,
    /// Destination with `ci`, `cr`, `ck` query parameters attached.
    pub location: String,
}

/// Resolves short codes to redirect targets.
///
/// Resolution is addressing-mode agnostic: a persisted
/// `creator_links.short_code` row wins, otherwise the code is decoded as a
/// stateless token. Either way the campaign must exist and carry a shop
/// domain, or resolution fails before any redirect is issued.
pub struct RedirectService<L: CreatorLinkRepository, C: CampaignRepository> {
    links: Arc<L>,
    campaigns: Arc<C>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl<L: CreatorLinkRepository, C: CampaignRepository> RedirectService<L, C> {
    pub fn new(
        links: Arc<L>,
        campaigns: Arc<C>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            links,
            campaigns,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Resolves a short code and mints a fresh click id.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] (`not_found`) when the code matches neither
    ///   a persisted link nor a decodable token, or the campaign is missing,
    ///   or the destination does not parse as a URL.
    /// - [`AppError::Configuration`] (`campaign_not_configured`) when the
    ///   campaign has no shop domain.
    pub async fn resolve(&self, code: &str) -> Result<Redirect, AppError> {
        let resolved = match self.cache_get(code).await {
            Some(hit) => hit,
            None => {
                let resolved = self.resolve_uncached(code).await?;
                self.cache_put(code, &resolved).await;
                resolved
            }
        };

        let click_id = generate_click_id();
        let mut dest = Url::parse(&resolved.destination).map_err(|_| {
            AppError::not_found("not_found", "Destination is not a valid URL", json!({}))
        })?;

        {
            let mut pairs = dest.query_pairs_mut();
            pairs.append_pair("ci", &resolved.campaign_id);
            if let Some(cr) = &resolved.creator_id {
                pairs.append_pair("cr", cr);
            }
            pairs.append_pair("ck", &click_id);
        }

        Ok(Redirect {
            campaign_id: resolved.campaign_id,
            creator_id: resolved.creator_id,
            click_id,
            location: dest.into(),
        })
    }

    async fn resolve_uncached(&self, code: &str) -> Result<ResolvedLink, AppError> {
        let mut campaign_id: Option<String> = None;
        let mut creator_id: Option<String> = None;
        let mut landing_url: Option<String> = None;
        let mut token_path: Option<String> = None;

        // Stateful mode: persisted link record.
        if let Some(link) = self.links.find_by_short_code(code).await? {
            campaign_id = Some(link.campaign_id);
            creator_id = Some(link.creator_id);
            landing_url = link.landing_url;
        }

        // Stateless mode: self-describing token. Decode failure is simply
        // "no match", handled below.
        if campaign_id.is_none()
            && let Ok(payload) = short_code::decode(code)
        {
            campaign_id = Some(payload.ci);
            creator_id = payload.cr.filter(|c| !c.is_empty());
            token_path = payload.pa.filter(|p| !p.is_empty());
        }

        let Some(campaign_id) = campaign_id else {
            return Err(AppError::not_found(
                "not_found",
                "Short code did not resolve",
                json!({ "code": code }),
            ));
        };

        let campaign = self
            .campaigns
            .find_by_campaign_id(&campaign_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "not_found",
                    "Campaign not found",
                    json!({ "campaign_id": campaign_id }),
                )
            })?;

        let Some(shop) = campaign.shop.filter(|s| !s.is_empty()) else {
            return Err(AppError::not_configured(
                "campaign_not_configured",
                "Campaign has no shop configured",
                json!({ "campaign_id": campaign_id }),
            ));
        };

        let destination =
            compute_destination(&shop, landing_url.as_deref(), token_path.as_deref(), campaign.default_landing.as_deref())?;

        Ok(ResolvedLink {
            campaign_id,
            creator_id,
            destination,
        })
    }

    async fn cache_get(&self, code: &str) -> Option<ResolvedLink> {
        match self.cache.get(code).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(resolved) => {
                    tracing::debug!(code, "cache hit");
                    Some(resolved)
                }
                Err(e) => {
                    tracing::warn!(code, error = %e, "evicting undecodable cache entry");
                    let _ = self.cache.invalidate(code).await;
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                // Cache trouble degrades to repository lookups.
                tracing::warn!(code, error = %e, "cache read failed");
                None
            }
        }
    }

    async fn cache_put(&self, code: &str, resolved: &ResolvedLink) {
        if let Ok(raw) = serde_json::to_string(resolved)
            && let Err(e) = self
                .cache
                .set(code, &raw, Some(self.cache_ttl_seconds as usize))
                .await
        {
            tracing::warn!(code, error = %e, "cache write failed");
        }
    }
}

/// Applies the destination rules from the resolution contract:
/// an absolute persisted landing URL is used verbatim, a relative one is
/// prefixed with the shop origin, otherwise token path / default landing /
/// `/` is normalized to a leading slash under the shop origin.
fn compute_destination(
    shop: &str,
    landing_url: Option<&str>,
    token_path: Option<&str>,
    default_landing: Option<&str>,
) -> Result<String, AppError> {
    let candidate = if let Some(landing) = landing_url.filter(|l| !l.is_empty()) {
        if Url::parse(landing).is_ok() {
            landing.to_string()
        } else {
            format!("https://{}{}", shop, normalize_path(landing))
        }
    } else {
        let path = token_path.or(default_landing).unwrap_or("/").trim();
        let path = if path.is_empty() { "/" } else { path };
        format!("https://{}{}", shop, normalize_path(path))
    };

    Url::parse(&candidate)
        .map(String::from)
        .map_err(|_| AppError::not_found("not_found", "Destination is not a valid URL", json!({})))
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
