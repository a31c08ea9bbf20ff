//! Request normalization.
//!
//! Turns a [`RawPageRequest`] into a canonical [`PageRequest`]. Nothing here
//! fails: every malformed field degrades to its safe default.

use pager_core::{Cursor, Direction, PageRequest, RawPageRequest};
use serde_json::Value as Json;

use crate::config::PagerConfig;

/// Normalizes `raw` against the page-size bounds in `config`.
///
/// `offset` is the caller's fallback for `raw.current_offset`: it is used
/// when the request's own offset is absent or invalid.
#[must_use]
pub fn normalize_request(
    raw: &RawPageRequest,
    offset: Option<&Json>,
    config: &PagerConfig,
) -> PageRequest {
    let config = config.sanitized();

    let direction = match raw.direction.as_ref().and_then(Json::as_str) {
        Some("backward") => Direction::Backward,
        _ => Direction::Forward,
    };

    let page_size = raw
        .page_size
        .as_ref()
        .and_then(coerce_number)
        .filter(|p| p.is_finite() && *p > 0.0)
        .map_or(config.default_page_size, |p| {
            clamp_page_size(p, config.min_page_size, config.max_page_size)
        });

    let cursor = raw
        .cursor
        .as_ref()
        .and_then(Json::as_str)
        .and_then(Cursor::from_token);

    let current_offset = raw
        .current_offset
        .as_ref()
        .and_then(coerce_offset)
        .or_else(|| offset.and_then(coerce_offset))
        .unwrap_or(0);

    PageRequest {
        direction,
        page_size,
        cursor,
        current_offset,
    }
}

/// Reads a JSON number or a numeric string.
fn coerce_number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_page_size(requested: f64, min: u32, max: u32) -> u32 {
    // Clamped into [min, max] first, so the cast cannot leave u32 range.
    requested.clamp(f64::from(min), f64::from(max)).trunc() as u32
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn coerce_offset(value: &Json) -> Option<u64> {
    if let Json::Number(n) = value {
        if let Some(exact) = n.as_u64() {
            return Some(exact);
        }
    }
    coerce_number(value)
        .filter(|o| o.is_finite() && *o >= 0.0)
        .map(|o| o.min(u64::MAX as f64).trunc() as u64)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn raw(value: serde_json::Value) -> RawPageRequest {
        serde_json::from_value(value).unwrap()
    }

    fn normalize(value: serde_json::Value) -> PageRequest {
        normalize_request(&raw(value), None, &PagerConfig::default())
    }

    #[test]
    fn empty_request_gets_all_defaults() {
        let req = normalize(json!({}));
        assert_eq!(req.direction, Direction::Forward);
        assert_eq!(req.page_size, 25);
        assert_eq!(req.cursor, None);
        assert_eq!(req.current_offset, 0);
    }

    #[test]
    fn direction_is_forward_unless_explicitly_backward() {
        assert_eq!(normalize(json!({"direction": "backward"})).direction, Direction::Backward);
        assert_eq!(normalize(json!({"direction": "forward"})).direction, Direction::Forward);
        assert_eq!(normalize(json!({"direction": "BACKWARD"})).direction, Direction::Forward);
        assert_eq!(normalize(json!({"direction": 1})).direction, Direction::Forward);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(normalize(json!({"pageSize": 10})).page_size, 10);
        assert_eq!(normalize(json!({"pageSize": 500})).page_size, 50);
        assert_eq!(normalize(json!({"pageSize": 0.25})).page_size, 1);
        assert_eq!(normalize(json!({"pageSize": 12.9})).page_size, 12);
        assert_eq!(normalize(json!({"pageSize": "7"})).page_size, 7);
    }

    #[test]
    fn unusable_page_size_falls_back_to_default() {
        assert_eq!(normalize(json!({"pageSize": 0})).page_size, 25);
        assert_eq!(normalize(json!({"pageSize": -3})).page_size, 25);
        assert_eq!(normalize(json!({"pageSize": "NaN"})).page_size, 25);
        assert_eq!(normalize(json!({"pageSize": "inf"})).page_size, 25);
        assert_eq!(normalize(json!({"pageSize": "lots"})).page_size, 25);
        assert_eq!(normalize(json!({"pageSize": [5]})).page_size, 25);
    }

    #[test]
    fn page_size_respects_injected_bounds() {
        let config = PagerConfig {
            min_page_size: 5,
            max_page_size: 10,
            default_page_size: 8,
        };
        let clamp = |v: serde_json::Value| {
            normalize_request(&raw(json!({ "pageSize": v })), None, &config).page_size
        };
        assert_eq!(clamp(json!(2)), 5);
        assert_eq!(clamp(json!(20)), 10);
        assert_eq!(clamp(json!(null)), 8);
    }

    #[test]
    fn cursor_token_is_decoded_or_dropped() {
        let token = Cursor::from_bytes(b"pos".to_vec()).to_token();
        assert_eq!(
            normalize(json!({"cursor": token})).cursor,
            Some(Cursor::from_bytes(b"pos".to_vec()))
        );
        assert_eq!(normalize(json!({"cursor": "%%%"})).cursor, None);
        assert_eq!(normalize(json!({"cursor": 12})).cursor, None);
        assert_eq!(normalize(json!({"cursor": ""})).cursor, None);
    }

    #[test]
    fn current_offset_falls_back_to_offset_parameter() {
        let config = PagerConfig::default();
        let own = normalize_request(&raw(json!({"currentOffset": 30})), Some(&json!(10)), &config);
        assert_eq!(own.current_offset, 30);

        let missing = normalize_request(&raw(json!({})), Some(&json!(10)), &config);
        assert_eq!(missing.current_offset, 10);

        let invalid =
            normalize_request(&raw(json!({"currentOffset": -4})), Some(&json!("12")), &config);
        assert_eq!(invalid.current_offset, 12);

        let both_invalid =
            normalize_request(&raw(json!({"currentOffset": "x"})), Some(&json!(-1)), &config);
        assert_eq!(both_invalid.current_offset, 0);

        let fractional = normalize_request(&raw(json!({"currentOffset": 6.7})), None, &config);
        assert_eq!(fractional.current_offset, 6);
    }

    proptest! {
        #[test]
        fn positive_page_sizes_clamp_into_bounds(p in 0.000_001f64..1.0e12) {
            let req = normalize(json!({"pageSize": p}));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let expected = p.clamp(1.0, 50.0).trunc() as u32;
            prop_assert_eq!(req.page_size, expected);
            prop_assert!((1..=50).contains(&req.page_size));
        }

        #[test]
        fn non_positive_page_sizes_use_default(p in -1.0e12f64..=0.0) {
            prop_assert_eq!(normalize(json!({"pageSize": p})).page_size, 25);
        }

        #[test]
        fn integral_page_sizes_match_min_max_formula(p in 1u32..10_000) {
            prop_assert_eq!(normalize(json!({"pageSize": p})).page_size, p.clamp(1, 50));
        }
    }
}
