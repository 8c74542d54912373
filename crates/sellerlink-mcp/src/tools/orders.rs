//! Order management tools.

use super::{arg_text, list_of, pick, pick_or_dash, query_from_args, rupees};
use reqwest::Method;
use sellerlink_client::{ApiClient, ClientResult};
use serde_json::{json, Map, Value};

pub async fn list_orders(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let query = query_from_args(args, &["status", "from_date", "to_date", "limit"]);
    let reply = api.call(seller_id, Method::GET, &format!("/orders{query}"), None).await?;

    let orders = list_of(&reply, "orders");
    if orders.is_empty() {
        return Ok(format!("No orders found for seller {seller_id}."));
    }

    let mut out = format!("Found {} orders (seller {seller_id}):\n", orders.len());
    for (i, o) in orders.iter().enumerate() {
        let items = o.get("items").and_then(Value::as_array).map(Vec::len);
        out.push_str(&format!(
            "\n{}. Order {} | Status: {} | Amount: {} | Date: {}\n",
            i + 1,
            pick_or_dash(o, &["id", "order_id"]),
            pick_or_dash(o, &["status"]),
            rupees(o, &["total_amount", "amount"]),
            pick_or_dash(o, &["created_at", "order_date", "date"]),
        ));
        if let Some(count) = items {
            out.push_str(&format!("   Items: {count}\n"));
        }
    }
    Ok(out)
}

pub async fn get_order(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let order_id = arg_text(args, "order_id");
    let reply = api.call(seller_id, Method::GET, &format!("/orders/{order_id}"), None).await?;
    let o = reply.get("order").unwrap_or(&reply);

    let mut out = format!(
        "Order {order_id}:\n  Status: {}\n  Amount: {}\n  Date: {}\n",
        pick_or_dash(o, &["status"]),
        rupees(o, &["total_amount", "amount"]),
        pick_or_dash(o, &["created_at", "order_date", "date"]),
    );
    if let Some(customer) = pick(o, &["customer_name", "customer"]) {
        out.push_str(&format!("  Customer: {customer}\n"));
    }
    if let Some(items) = o.get("items").and_then(Value::as_array) {
        out.push_str(&format!("  Items ({}):\n", items.len()));
        for item in items {
            out.push_str(&format!(
                "    - {} x{} ({})\n",
                pick_or_dash(item, &["name", "sku"]),
                pick_or_dash(item, &["quantity", "qty"]),
                rupees(item, &["price", "selling_price"]),
            ));
        }
    }
    if let Some(tracking) = pick(o, &["tracking_id"]) {
        out.push_str(&format!("  Tracking: {tracking}\n"));
    }
    Ok(out)
}

pub async fn update_order_status(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let order_id = arg_text(args, "order_id");
    let status = arg_text(args, "status");

    let mut body = Map::new();
    body.insert("status".to_string(), json!(status));
    for key in ["tracking_id", "courier_partner"] {
        if let Some(v) = args.get(key) {
            body.insert(key.to_string(), v.clone());
        }
    }
    api.call(
        seller_id,
        Method::POST,
        &format!("/orders/{order_id}/status"),
        Some(&Value::Object(body)),
    )
    .await?;

    // The tracking and courier lines only appear when the caller supplied them.
    let mut out = format!("Order {order_id} updated to '{status}'.\n");
    if let Some(tracking) = args.get("tracking_id").and_then(Value::as_str) {
        out.push_str(&format!("Tracking: {tracking}\n"));
    }
    if let Some(courier) = args.get("courier_partner").and_then(Value::as_str) {
        out.push_str(&format!("Courier: {courier}\n"));
    }
    Ok(out)
}
