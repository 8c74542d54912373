//! Analytics tools.

use super::{arg_text, query_from_args};
use reqwest::Method;
use sellerlink_client::{ApiClient, ClientResult};
use serde_json::{Map, Value};

pub async fn get_analytics(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let metric = arg_text(args, "metric");
    let query = query_from_args(args, &["from_date", "to_date"]);
    let reply = api
        .call(seller_id, Method::GET, &format!("/analytics/{metric}{query}"), None)
        .await?;

    let mut out = format!("Analytics '{metric}' for seller {seller_id}");
    match (args.get("from_date").and_then(Value::as_str), args.get("to_date").and_then(Value::as_str)) {
        (Some(from), Some(to)) => out.push_str(&format!(" ({from} to {to})")),
        (Some(from), None) => out.push_str(&format!(" (from {from})")),
        (None, Some(to)) => out.push_str(&format!(" (until {to})")),
        (None, None) => {}
    }
    out.push_str(":\n");

    let data = reply.get("data").unwrap_or(&reply);
    match data.as_object() {
        Some(map) if !map.is_empty() => {
            for (key, value) in map {
                out.push_str(&format!("  {key}: {}\n", render_value(value)));
            }
        }
        _ => out.push_str("  No data available.\n"),
    }
    Ok(out)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
