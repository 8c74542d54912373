//! Return-request tools.

use super::{arg_text, list_of, pick, pick_or_dash, query_from_args, rupees};
use reqwest::Method;
use sellerlink_client::{ApiClient, ClientResult};
use serde_json::{json, Map, Value};

pub async fn get_returns(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let query = query_from_args(args, &["status", "limit"]);
    let reply = api.call(seller_id, Method::GET, &format!("/returns{query}"), None).await?;

    let returns = list_of(&reply, "returns");
    if returns.is_empty() {
        return Ok(format!("No return requests found for seller {seller_id}."));
    }

    let mut out = format!("Found {} return requests (seller {seller_id}):\n", returns.len());
    for (i, r) in returns.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. Return {} | Order: {} | Status: {} | Amount: {}\n",
            i + 1,
            pick_or_dash(r, &["id", "return_id"]),
            pick_or_dash(r, &["order_id"]),
            pick_or_dash(r, &["status"]),
            rupees(r, &["refund_amount", "amount"]),
        ));
        if let Some(reason) = pick(r, &["reason"]) {
            out.push_str(&format!("   Reason: {reason}\n"));
        }
    }
    Ok(out)
}

pub async fn process_return(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let return_id = arg_text(args, "return_id");
    let action = arg_text(args, "action");

    let mut body = Map::new();
    body.insert("action".to_string(), json!(action));
    if let Some(reason) = args.get("reason") {
        body.insert("reason".to_string(), reason.clone());
    }
    api.call(
        seller_id,
        Method::POST,
        &format!("/returns/{return_id}/process"),
        Some(&Value::Object(body)),
    )
    .await?;

    let verb = if action == "approve" { "approved" } else { "rejected" };
    let mut out = format!("Return {return_id} {verb}.\n");
    if let Some(reason) = args.get("reason").and_then(Value::as_str) {
        out.push_str(&format!("Reason: {reason}\n"));
    }
    Ok(out)
}
