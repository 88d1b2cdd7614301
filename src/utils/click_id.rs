//! Click identifier generation.

use chrono::Utc;
use rand::Rng;

/// Generates a globally unique click identifier.
///
/// Uses a v4 UUID from the OS entropy source. The timestamp-based form in
/// [`fallback_click_id`] is kept as the degraded path for environments
/// where secure randomness is unavailable.
pub fn generate_click_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Timestamp + random-suffix click id for environments without a CSPRNG.
///
/// Weaker uniqueness than a UUID; acceptable only because click ids are
/// analytics keys, not security tokens.
#[allow(dead_code)]
pub fn fallback_click_id() -> String {
    let suffix: u32 = rand::rng().random_range(0..36_u32.pow(6));
    format!("{}{:06}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_click_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_click_id()));
        }
    }

    #[test]
    fn test_click_id_is_uuid_shaped() {
        let id = generate_click_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }

    #[test]
    fn test_fallback_id_is_sortable_by_time() {
        let id = fallback_click_id();
        assert!(id.len() >= 13);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
