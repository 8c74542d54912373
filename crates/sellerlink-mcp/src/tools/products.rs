//! Product catalog tools.

use super::{arg_text, list_of, pick, pick_or_dash, query_from_args, rupees};
use reqwest::Method;
use sellerlink_client::{ApiClient, ClientResult};
use serde_json::{Map, Value};

pub async fn list_products(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let query = query_from_args(args, &["status", "category", "limit", "offset"]);
    let reply = api.call(seller_id, Method::GET, &format!("/products{query}"), None).await?;

    let products = list_of(&reply, "products");
    if products.is_empty() {
        return Ok(format!("No products found for seller {seller_id}."));
    }

    let mut out = format!("Found {} products (seller {seller_id}):\n", products.len());
    for (i, p) in products.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} (SKU: {})\n   ID: {} | Brand: {} | Category: {}\n   Price: {} (MRP {}) | Inventory: {} | Status: {}\n",
            i + 1,
            pick_or_dash(p, &["name"]),
            pick_or_dash(p, &["sku"]),
            pick_or_dash(p, &["id", "product_id"]),
            pick_or_dash(p, &["brand"]),
            pick_or_dash(p, &["category"]),
            rupees(p, &["selling_price", "price"]),
            rupees(p, &["mrp"]),
            pick_or_dash(p, &["inventory", "quantity"]),
            pick_or_dash(p, &["status"]),
        ));
    }
    Ok(out)
}

pub async fn get_product(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let product_id = arg_text(args, "product_id");
    let reply = api
        .call(seller_id, Method::GET, &format!("/products/{product_id}"), None)
        .await?;
    let p = reply.get("product").unwrap_or(&reply);

    let mut out = format!(
        "Product {product_id}:\n  Name: {}\n  SKU: {}\n  Brand: {}\n  Category: {}\n  Price: {} (MRP {})\n  Inventory: {}\n  Status: {}\n",
        pick_or_dash(p, &["name"]),
        pick_or_dash(p, &["sku"]),
        pick_or_dash(p, &["brand"]),
        pick_or_dash(p, &["category"]),
        rupees(p, &["selling_price", "price"]),
        rupees(p, &["mrp"]),
        pick_or_dash(p, &["inventory", "quantity"]),
        pick_or_dash(p, &["status"]),
    );
    if let Some(description) = pick(p, &["description"]) {
        out.push_str(&format!("  Description: {description}\n"));
    }
    Ok(out)
}

pub async fn create_product(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let mut body = Map::new();
    for key in
        ["sku", "name", "brand", "category", "mrp", "selling_price", "inventory", "description", "images"]
    {
        if let Some(v) = args.get(key) {
            body.insert(key.to_string(), v.clone());
        }
    }
    let reply = api
        .call(seller_id, Method::POST, "/products", Some(&Value::Object(body)))
        .await?;

    let id = pick(&reply, &["id", "product_id"])
        .or_else(|| reply.get("product").map(|p| pick_or_dash(p, &["id", "product_id"])))
        .unwrap_or_else(|| "-".to_string());
    Ok(format!(
        "Created product '{}' (SKU: {}) with ID {id}.",
        arg_text(args, "name"),
        arg_text(args, "sku"),
    ))
}

pub async fn update_product(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let product_id = arg_text(args, "product_id");
    let updates = args.get("updates").cloned().unwrap_or(Value::Object(Map::new()));
    let fields: Vec<String> = updates
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    api.call(seller_id, Method::PATCH, &format!("/products/{product_id}"), Some(&updates))
        .await?;

    if fields.is_empty() {
        Ok(format!("Updated product {product_id}."))
    } else {
        Ok(format!("Updated product {product_id} ({} fields: {}).", fields.len(), fields.join(", ")))
    }
}

pub async fn update_inventory(
    api: &ApiClient,
    seller_id: &str,
    args: &Map<String, Value>,
) -> ClientResult<String> {
    let product_id = arg_text(args, "product_id");
    let quantity = args.get("quantity").cloned().unwrap_or(Value::Null);
    api.call(
        seller_id,
        Method::PUT,
        &format!("/products/{product_id}/inventory"),
        Some(&serde_json::json!({ "quantity": quantity })),
    )
    .await?;
    Ok(format!("Inventory for product {product_id} set to {quantity}."))
}
