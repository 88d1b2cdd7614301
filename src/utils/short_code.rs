//! Stateless short-code codec.
//!
//! A short code is either a key into the `creator_links` table or a
//! self-describing token: compact JSON `{ci, cr?, pa?}` encoded as URL-safe
//! base64 without padding. The token is opaque but readable; it is not
//! signed and must never be treated as an access-control mechanism.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Payload carried by a stateless short code.
///
/// Field names are deliberately terse to keep tokens compact:
/// `ci` = campaign id, `cr` = creator id, `pa` = landing path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortCodePayload {
    pub ci: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pa: Option<String>,
}

/// Reasons a token failed to decode.
///
/// Callers treat any decode failure as "not found", never as a fatal error:
/// an arbitrary path segment is a perfectly legal thing to receive here.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has no campaign id")]
    MissingCampaign,
}

/// Encodes a payload into a URL-safe token.
pub fn encode(payload: &ShortCodePayload) -> String {
    // Serialization of a string-only struct cannot fail.
    let json = serde_json::to_vec(payload).expect("short code payload serializes");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a token back into its payload.
///
/// Tolerates trailing `=` padding so that tokens produced by a strict
/// base64url encoder still resolve.
pub fn decode(token: &str) -> Result<ShortCodePayload, DecodeError> {
    let raw = URL_SAFE_NO_PAD.decode(token.trim_end_matches('='))?;
    let payload: ShortCodePayload = serde_json::from_slice(&raw)?;
    if payload.ci.is_empty() {
        return Err(DecodeError::MissingCampaign);
    }
    Ok(payload)
}
