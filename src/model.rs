//! Product entity and coercion of loosely typed JSON bodies into column values.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Number, Value};
use utoipa::ToSchema;

/// Table backing [`Product`].
pub const PRODUCTS_TABLE: &str = "products";

/// Maximum length of `products.name` (VARCHAR(100)).
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The ID of the Product
    #[schema(example = 1)]
    pub id: i32,
    /// Name of the Product
    #[schema(example = "Soccer ball")]
    pub name: String,
    /// Price of the Product
    #[schema(example = 99.99)]
    pub price: f64,
    /// Product availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    /// `None` leaves the column default (`true`).
    pub availability: Option<bool>,
}

/// Column values for an update; `None` leaves the stored value unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<bool>,
}

impl NewProduct {
    /// Coerce a request body into insert values. Unknown keys are ignored.
    pub fn from_body(body: &Value) -> Result<Self, StorageError> {
        let mut violations = Vec::new();
        let name = coerce(body, "name", coerce_name, &mut violations);
        let price = coerce(body, "price", coerce_price, &mut violations);
        let availability = coerce(body, "availability", coerce_availability, &mut violations);
        if name.is_none() && !violations.iter().any(|v| v.starts_with("name ")) {
            violations.push("notNull Violation: name cannot be null".into());
        }
        if price.is_none() && !violations.iter().any(|v| v.starts_with("price ")) {
            violations.push("notNull Violation: price cannot be null".into());
        }
        match (name, price) {
            (Some(name), Some(price)) if violations.is_empty() => Ok(NewProduct {
                name,
                price,
                availability,
            }),
            _ => Err(StorageError::Validation(violations)),
        }
    }
}

impl ProductChanges {
    /// Coerce a request body into update values. Unknown keys are ignored.
    pub fn from_body(body: &Value) -> Result<Self, StorageError> {
        let mut violations = Vec::new();
        let changes = ProductChanges {
            name: coerce(body, "name", coerce_name, &mut violations),
            price: coerce(body, "price", coerce_price, &mut violations),
            availability: coerce(body, "availability", coerce_availability, &mut violations),
        };
        if violations.is_empty() {
            Ok(changes)
        } else {
            Err(StorageError::Validation(violations))
        }
    }

    /// Set the provided fields on an already-loaded record.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(availability) = self.availability {
            product.availability = availability;
        }
    }
}

/// Decimal text of a JSON number. Integral values below 1e21 print without an exponent or fraction,
/// so `1e20` reads as `100000000000000000000` and `10.0` as `10`.
pub(crate) fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn coerce<T>(
    body: &Value,
    field: &str,
    convert: fn(&Value) -> Result<T, String>,
    violations: &mut Vec<String>,
) -> Option<T> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(v) => match convert(v) {
            Ok(t) => Some(t),
            Err(reason) => {
                violations.push(format!("{} {}", field, reason));
                None
            }
        },
    }
}

fn coerce_name(v: &Value) -> Result<String, String> {
    let s = match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        _ => return Err("cannot be an array or an object".into()),
    };
    if s.chars().count() > NAME_MAX_LENGTH {
        return Err(format!("must be at most {} characters", NAME_MAX_LENGTH));
    }
    Ok(s)
}

fn coerce_price(v: &Value) -> Result<f64, String> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{}' is not a valid float", v))
}

fn coerce_availability(v: &Value) -> Result<bool, String> {
    match v {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(false),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(format!("'{}' is not a valid boolean", s)),
        },
        _ => Err(format!("'{}' is not a valid boolean", v)),
    }
}
