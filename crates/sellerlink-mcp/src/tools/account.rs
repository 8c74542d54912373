//! Authentication status tool.

use super::pick;
use reqwest::Method;
use sellerlink_client::{ApiClient, ClientResult};
use tracing::debug;

/// Authentication state plus a best-effort account-info fetch. A failed
/// fetch degrades to a partial success, never an error.
pub async fn status(api: &ApiClient, seller_id: &str) -> ClientResult<String> {
    if !api.sessions().is_authenticated(seller_id).await {
        return Ok(format!(
            "Seller {seller_id} is not authenticated. Call the authenticate tool with your API credentials."
        ));
    }

    let mut out = format!("Seller {seller_id} is authenticated.\n");
    match api.call(seller_id, Method::GET, "/account/info", None).await {
        Ok(reply) => {
            let info = reply.get("account").unwrap_or(&reply);
            for (label, keys) in [
                ("Account", &["name", "business_name"][..]),
                ("Email", &["email"][..]),
                ("Phone", &["phone", "mobile"][..]),
                ("Rating", &["rating"][..]),
            ] {
                if let Some(value) = pick(info, keys) {
                    out.push_str(&format!("{label}: {value}\n"));
                }
            }
        }
        Err(e) => {
            debug!(seller_id, error = %e, "account info fetch failed");
            out.push_str(&format!("Account details unavailable: {e}\n"));
        }
    }
    Ok(out)
}
