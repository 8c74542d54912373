//! Per-tool handlers.
//!
//! Each handler shapes the validated arguments into one outbound API call
//! and renders the JSON reply into its fixed text template. Authentication
//! is already guaranteed by the gateway before a handler runs.

pub mod account;
pub mod analytics;
pub mod orders;
pub mod products;
pub mod returns;

use serde_json::{Map, Value};

/// First present key rendered as display text.
pub(crate) fn pick(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            Some(Value::Bool(b)) => return Some(b.to_string()),
            _ => continue,
        }
    }
    None
}

/// Like [`pick`] with a `-` placeholder for absent fields.
pub(crate) fn pick_or_dash(value: &Value, keys: &[&str]) -> String {
    pick(value, keys).unwrap_or_else(|| "-".to_string())
}

/// Rupee-formatted amount, `-` when absent.
pub(crate) fn rupees(value: &Value, keys: &[&str]) -> String {
    match pick(value, keys) {
        Some(amount) => format!("\u{20b9}{amount}"),
        None => "-".to_string(),
    }
}

/// Argument as display text (strings unquoted, everything else compact JSON).
pub(crate) fn arg_text(args: &Map<String, Value>, key: &str) -> String {
    match args.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Build `?k=v&...` from present string/number arguments, URL-encoding values.
pub(crate) fn query_from_args(args: &Map<String, Value>, keys: &[&str]) -> String {
    let mut pairs = Vec::new();
    for key in keys {
        let value = match args.get(*key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        pairs.push(format!("{key}={}", urlencoding::encode(&value)));
    }
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// The array under `key`, or the value itself when the API returns a bare list.
pub(crate) fn list_of(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .or_else(|| value.as_array())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_encodes_and_skips_absent() {
        let mut args = Map::new();
        args.insert("status".to_string(), json!("all"));
        args.insert("category".to_string(), json!("home & kitchen"));
        args.insert("limit".to_string(), json!(50));
        let q = query_from_args(&args, &["status", "category", "limit", "offset"]);
        assert_eq!(q, "?status=all&category=home%20%26%20kitchen&limit=50");
    }

    #[test]
    fn list_of_accepts_wrapped_and_bare_arrays() {
        assert_eq!(list_of(&json!({"orders": [1, 2]}), "orders").len(), 2);
        assert_eq!(list_of(&json!([1, 2, 3]), "orders").len(), 3);
        assert!(list_of(&json!({"total": 0}), "orders").is_empty());
    }

    #[test]
    fn pick_prefers_earlier_keys() {
        let v = json!({"total_amount": 100, "amount": 50});
        assert_eq!(pick(&v, &["total_amount", "amount"]).unwrap(), "100");
        assert_eq!(rupees(&v, &["amount"]), "\u{20b9}50");
        assert_eq!(pick_or_dash(&v, &["missing"]), "-");
    }
}
