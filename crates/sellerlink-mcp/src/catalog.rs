//! Static tool catalog.
//!
//! One entry per tool: name, description, and the argument schema the
//! gateway validates against before any handler runs. Defaults and enums
//! declared here are the contract; handlers receive arguments with defaults
//! already applied.

use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Integer,
    Number,
    Object,
    Array,
}

impl ArgKind {
    fn json_type(self) -> &'static str {
        match self {
            ArgKind::String => "string",
            ArgKind::Integer => "integer",
            ArgKind::Number => "number",
            ArgKind::Object => "object",
            ArgKind::Array => "array",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ArgKind::String => value.is_string(),
            ArgKind::Integer => value.is_i64() || value.is_u64(),
            ArgKind::Number => value.is_number(),
            ArgKind::Object => value.is_object(),
            ArgKind::Array => value.is_array(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ArgDefault {
    Str(&'static str),
    Int(i64),
}

impl ArgDefault {
    fn to_value(self) -> Value {
        match self {
            ArgDefault::Str(s) => Value::String(s.to_string()),
            ArgDefault::Int(i) => json!(i),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<ArgDefault>,
    /// Allowed values; empty slice means unconstrained.
    pub allowed: &'static [&'static str],
}

impl ArgSpec {
    const fn required(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self { name, kind, description, required: true, default: None, allowed: &[] }
    }

    const fn optional(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self { name, kind, description, required: false, default: None, allowed: &[] }
    }

    const fn with_default(mut self, default: ArgDefault) -> Self {
        self.default = Some(default);
        self
    }

    const fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgSpec],
}

impl ToolSpec {
    /// JSON Schema for `tools/list`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for arg in self.args {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(arg.kind.json_type()));
            prop.insert("description".to_string(), json!(arg.description));
            if !arg.allowed.is_empty() {
                prop.insert("enum".to_string(), json!(arg.allowed));
            }
            if let Some(default) = arg.default {
                prop.insert("default".to_string(), default.to_value());
            }
            properties.insert(arg.name.to_string(), Value::Object(prop));
            if arg.required {
                required.push(arg.name);
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check `args` against this spec and apply defaults. Returns the
    /// validated argument map or a message naming the first violation.
    pub fn validate(&self, args: Option<&Value>) -> Result<Map<String, Value>, String> {
        let mut out = match args {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err("arguments must be an object".to_string()),
        };

        for spec in self.args {
            match out.get(spec.name) {
                Some(Value::Null) | None => {
                    if spec.required {
                        return Err(format!("Missing required argument: {}", spec.name));
                    }
                    if let Some(default) = spec.default {
                        out.insert(spec.name.to_string(), default.to_value());
                    }
                }
                Some(value) => {
                    if !spec.kind.matches(value) {
                        return Err(format!(
                            "Argument '{}' must be of type {}",
                            spec.name,
                            spec.kind.json_type()
                        ));
                    }
                    if !spec.allowed.is_empty() {
                        let ok = value
                            .as_str()
                            .is_some_and(|s| spec.allowed.contains(&s));
                        if !ok {
                            return Err(format!(
                                "Argument '{}' must be one of: {}",
                                spec.name,
                                spec.allowed.join(", ")
                            ));
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

const SELLER_ID: ArgSpec =
    ArgSpec::required("seller_id", ArgKind::String, "Seller account identifier");

const ORDER_STATUSES: &[&str] =
    &["all", "pending", "confirmed", "shipped", "delivered", "cancelled"];
const PRODUCT_STATUSES: &[&str] = &["all", "active", "inactive", "out_of_stock"];
const RETURN_STATUSES: &[&str] = &["all", "requested", "approved", "rejected", "completed"];
const RETURN_ACTIONS: &[&str] = &["approve", "reject"];

static CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "authenticate",
        description: "Authenticate a seller account with API credentials",
        args: &[
            SELLER_ID,
            ArgSpec::required("api_key", ArgKind::String, "API key issued to the seller"),
            ArgSpec::required("api_secret", ArgKind::String, "API secret issued to the seller"),
        ],
    },
    ToolSpec {
        name: "status",
        description: "Show authentication status and account details for a seller",
        args: &[SELLER_ID],
    },
    ToolSpec {
        name: "list_products",
        description: "List products in the seller's catalog",
        args: &[
            SELLER_ID,
            ArgSpec::optional("status", ArgKind::String, "Filter by product status")
                .with_default(ArgDefault::Str("all"))
                .with_allowed(PRODUCT_STATUSES),
            ArgSpec::optional("category", ArgKind::String, "Filter by category"),
            ArgSpec::optional("limit", ArgKind::Integer, "Maximum number of products")
                .with_default(ArgDefault::Int(50)),
            ArgSpec::optional("offset", ArgKind::Integer, "Number of products to skip")
                .with_default(ArgDefault::Int(0)),
        ],
    },
    ToolSpec {
        name: "get_product",
        description: "Fetch a single product by id",
        args: &[SELLER_ID, ArgSpec::required("product_id", ArgKind::String, "Product identifier")],
    },
    ToolSpec {
        name: "create_product",
        description: "Create a new product listing",
        args: &[
            SELLER_ID,
            ArgSpec::required("sku", ArgKind::String, "Stock keeping unit"),
            ArgSpec::required("name", ArgKind::String, "Product name"),
            ArgSpec::required("brand", ArgKind::String, "Brand name"),
            ArgSpec::required("category", ArgKind::String, "Product category"),
            ArgSpec::required("mrp", ArgKind::Number, "Maximum retail price"),
            ArgSpec::required("selling_price", ArgKind::Number, "Listed selling price"),
            ArgSpec::required("inventory", ArgKind::Integer, "Initial inventory count"),
            ArgSpec::optional("description", ArgKind::String, "Product description"),
            ArgSpec::optional("images", ArgKind::Array, "Image URLs"),
        ],
    },
    ToolSpec {
        name: "update_product",
        description: "Update fields of an existing product",
        args: &[
            SELLER_ID,
            ArgSpec::required("product_id", ArgKind::String, "Product identifier"),
            ArgSpec::required("updates", ArgKind::Object, "Fields to change"),
        ],
    },
    ToolSpec {
        name: "update_inventory",
        description: "Set the inventory count for a product",
        args: &[
            SELLER_ID,
            ArgSpec::required("product_id", ArgKind::String, "Product identifier"),
            ArgSpec::required("quantity", ArgKind::Integer, "New inventory count"),
        ],
    },
    ToolSpec {
        name: "list_orders",
        description: "List orders for the seller",
        args: &[
            SELLER_ID,
            ArgSpec::optional("status", ArgKind::String, "Filter by order status")
                .with_default(ArgDefault::Str("all"))
                .with_allowed(ORDER_STATUSES),
            ArgSpec::optional("from_date", ArgKind::String, "Start date (YYYY-MM-DD)"),
            ArgSpec::optional("to_date", ArgKind::String, "End date (YYYY-MM-DD)"),
            ArgSpec::optional("limit", ArgKind::Integer, "Maximum number of orders")
                .with_default(ArgDefault::Int(50)),
        ],
    },
    ToolSpec {
        name: "get_order",
        description: "Fetch a single order by id",
        args: &[SELLER_ID, ArgSpec::required("order_id", ArgKind::String, "Order identifier")],
    },
    ToolSpec {
        name: "update_order_status",
        description: "Update an order's fulfilment status",
        args: &[
            SELLER_ID,
            ArgSpec::required("order_id", ArgKind::String, "Order identifier"),
            ArgSpec::required("status", ArgKind::String, "New order status")
                .with_allowed(&["confirmed", "shipped", "delivered", "cancelled"]),
            ArgSpec::optional("tracking_id", ArgKind::String, "Shipment tracking id"),
            ArgSpec::optional("courier_partner", ArgKind::String, "Courier partner name"),
        ],
    },
    ToolSpec {
        name: "get_returns",
        description: "List return requests for the seller",
        args: &[
            SELLER_ID,
            ArgSpec::optional("status", ArgKind::String, "Filter by return status")
                .with_default(ArgDefault::Str("all"))
                .with_allowed(RETURN_STATUSES),
            ArgSpec::optional("limit", ArgKind::Integer, "Maximum number of returns")
                .with_default(ArgDefault::Int(50)),
        ],
    },
    ToolSpec {
        name: "process_return",
        description: "Approve or reject a return request",
        args: &[
            SELLER_ID,
            ArgSpec::required("return_id", ArgKind::String, "Return request identifier"),
            ArgSpec::required("action", ArgKind::String, "Decision on the return")
                .with_allowed(RETURN_ACTIONS),
            ArgSpec::optional("reason", ArgKind::String, "Reason for the decision"),
        ],
    },
    ToolSpec {
        name: "get_analytics",
        description: "Fetch an analytics metric for the seller",
        args: &[
            SELLER_ID,
            ArgSpec::required("metric", ArgKind::String, "Metric name, e.g. sales or orders"),
            ArgSpec::optional("from_date", ArgKind::String, "Start date (YYYY-MM-DD)"),
            ArgSpec::optional("to_date", ArgKind::String, "End date (YYYY-MM-DD)"),
        ],
    },
];

/// The full, immutable tool catalog.
pub fn catalog() -> &'static [ToolSpec] {
    CATALOG
}

/// Look up a catalog entry by tool name.
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|t| t.name == name)
}
