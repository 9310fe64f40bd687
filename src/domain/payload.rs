//! Page payload decoding.
//!
//! Turns a raw response body into the items it contributes. Decoding never
//! fails: a body that is not the expected shape contributes zero items, and a
//! record that does not validate is dropped and counted.
//!
//! Expected shape:
//!
//! ```json
//! { "items": [ { "name": "javascript", "count": 2528971 }, ... ] }
//! ```

use super::Item;
use serde_json::Value;

/// Result of decoding one page body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDecode {
    /// Records that passed validation, in payload order.
    pub items: Vec<Item>,
    /// Records present in `items` that failed validation.
    pub dropped: usize,
    /// Whether the body itself was unusable (not JSON, no `items` array).
    pub malformed: bool,
}

impl PageDecode {
    fn malformed() -> Self {
        Self {
            items: vec![],
            dropped: 0,
            malformed: true,
        }
    }
}

/// Decodes a page response body.
///
/// # Examples
///
/// ```
/// use tagtable::domain::payload::decode_page;
///
/// let page = decode_page(br#"{"items":[{"name":"rust","count":7},{"name":"","count":1}]}"#);
/// assert_eq!(page.items.len(), 1);
/// assert_eq!(page.dropped, 1);
///
/// let junk = decode_page(b"<html>rate limited</html>");
/// assert!(junk.malformed);
/// assert!(junk.items.is_empty());
/// ```
#[must_use]
pub fn decode_page(body: &[u8]) -> PageDecode {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, body_len = body.len(), "page body is not JSON");
            return PageDecode::malformed();
        }
    };

    let Some(records) = value.get("items").and_then(Value::as_array) else {
        tracing::debug!("page body has no items array");
        return PageDecode::malformed();
    };

    let mut items = Vec::with_capacity(records.len());
    let mut dropped = 0;

    for record in records {
        match decode_item(record) {
            Some(item) => items.push(item),
            None => {
                tracing::trace!(record = %record, "dropping invalid record");
                dropped += 1;
            }
        }
    }

    PageDecode {
        items,
        dropped,
        malformed: false,
    }
}

fn decode_item(record: &Value) -> Option<Item> {
    let name = record.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    let count = coerce_count(record.get("count")?)?;
    Some(Item::new(name, count))
}

/// Coerces a JSON value to a non-negative integer.
///
/// Accepts unsigned integers, non-negative signed integers, integral
/// non-negative floats and strings holding such an integer.
fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
            if n.as_i64().is_some() {
                // negative integer
                return None;
            }
            n.as_f64().and_then(coerce_float)
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(coerce_float))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_float(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_page_in_order() {
        let body = br#"{"items":[{"name":"javascript","count":3},{"name":"python","count":2}],"has_more":true}"#;
        let page = decode_page(body);

        assert!(!page.malformed);
        assert_eq!(page.dropped, 0);
        assert_eq!(
            page.items,
            vec![Item::new("javascript", 3), Item::new("python", 2)]
        );
    }

    #[test]
    fn non_json_body_is_empty_contribution() {
        let page = decode_page(b"not json at all");
        assert!(page.malformed);
        assert!(page.items.is_empty());
    }

    #[test]
    fn missing_or_mistyped_items_field_is_empty_contribution() {
        assert!(decode_page(br#"{"error_id":502}"#).malformed);
        assert!(decode_page(br#"{"items":{"name":"x"}}"#).malformed);
        assert!(decode_page(br#"[{"name":"x","count":1}]"#).malformed);
        assert!(decode_page(b"").malformed);
    }

    #[test]
    fn empty_items_array_is_not_malformed() {
        let page = decode_page(br#"{"items":[]}"#);
        assert!(!page.malformed);
        assert!(page.items.is_empty());
    }

    #[test]
    fn invalid_records_are_dropped_and_counted() {
        let body = br#"{"items":[
            {"name":"ok","count":1},
            {"name":"","count":1},
            {"name":42,"count":1},
            {"count":1},
            {"name":"negative","count":-5},
            {"name":"fraction","count":1.5},
            {"name":"missing"},
            {"name":"bool","count":true},
            "not an object"
        ]}"#;
        let page = decode_page(body);

        assert_eq!(page.items, vec![Item::new("ok", 1)]);
        assert_eq!(page.dropped, 8);
    }

    #[test]
    fn count_coerces_from_integral_float_and_numeric_string() {
        let body = br#"{"items":[
            {"name":"float","count":12.0},
            {"name":"string","count":" 34 "},
            {"name":"string-float","count":"5.0"},
            {"name":"zero","count":0}
        ]}"#;
        let page = decode_page(body);

        let counts: Vec<u64> = page.items.iter().map(|i| i.count).collect();
        assert_eq!(counts, [12, 34, 5, 0]);
        assert_eq!(page.dropped, 0);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = br#"{"items":[{"name":"rust","count":9,"has_synonyms":true,"is_moderator_only":false}]}"#;
        assert_eq!(decode_page(body).items, vec![Item::new("rust", 9)]);
    }
}
