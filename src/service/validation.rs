//! Request validation: field rule chains, per-route rule sets, and the gate that aggregates violations.

use crate::config::ValidationConfig;
use crate::error::AppError;
use crate::model::number_text;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").unwrap());

/// Where a validated value was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One violated rule.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The offending value; omitted when the field was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(location: Location, path: &str, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

/// Raw request data the validators inspect.
pub struct RequestData<'a> {
    pub body: &'a Value,
    pub params: &'a HashMap<String, String>,
}

impl RequestData<'_> {
    fn get(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Body => self.body.get(field).cloned(),
            Location::Params => self.params.get(field).map(|s| Value::String(s.clone())),
        }
    }
}

/// Anything that turns request data into a list of violations.
pub trait Validator: Send + Sync {
    fn validate(&self, req: &RequestData<'_>) -> Vec<FieldError>;
}

impl<F> Validator for F
where
    F: Fn(&RequestData<'_>) -> Vec<FieldError> + Send + Sync,
{
    fn validate(&self, req: &RequestData<'_>) -> Vec<FieldError> {
        self(req)
    }
}

struct Rule {
    check: fn(Option<&Value>) -> bool,
    message: &'static str,
}

/// Ordered checks on one field. Every failing check reports.
pub struct FieldChain {
    location: Location,
    field: &'static str,
    rules: Vec<Rule>,
}

impl FieldChain {
    pub fn body(field: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            rules: Vec::new(),
        }
    }

    pub fn param(field: &'static str) -> Self {
        Self {
            location: Location::Params,
            field,
            rules: Vec::new(),
        }
    }

    fn rule(mut self, check: fn(Option<&Value>) -> bool, message: &'static str) -> Self {
        self.rules.push(Rule { check, message });
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.rule(|v| !loose_string(v).is_empty(), message)
    }

    pub fn numeric(self, message: &'static str) -> Self {
        self.rule(|v| NUMERIC.is_match(&loose_string(v)), message)
    }

    pub fn integer(self, message: &'static str) -> Self {
        self.rule(|v| INTEGER.is_match(&loose_string(v)), message)
    }

    pub fn boolean(self, message: &'static str) -> Self {
        self.rule(
            |v| matches!(loose_string(v).as_str(), "true" | "false" | "1" | "0"),
            message,
        )
    }

    pub fn greater_than_zero(self, message: &'static str) -> Self {
        self.rule(|v| loose_number(v).is_some_and(|n| n > 0.0), message)
    }
}

impl Validator for FieldChain {
    fn validate(&self, req: &RequestData<'_>) -> Vec<FieldError> {
        let value = req.get(self.location, self.field);
        self.rules
            .iter()
            .filter(|rule| !(rule.check)(value.as_ref()))
            .map(|rule| FieldError::new(self.location, self.field, value.clone(), rule.message))
            .collect()
    }
}

/// String form used by the string-based checks: absent and null are empty.
fn loose_string(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric value for `> 0` comparisons; `None` never compares greater.
fn loose_number(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                // Only the spelled-out `Infinity` converts to an infinite number.
                s.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite() || s.strip_prefix(['+', '-']).unwrap_or(s) == "Infinity")
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Run every validator in order; fail with all violations if any reported.
pub fn gate(validators: &[Box<dyn Validator>], req: &RequestData<'_>) -> Result<(), AppError> {
    let errors: Vec<FieldError> = validators.iter().flat_map(|v| v.validate(req)).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "request rejected by validation");
        Err(AppError::Validation(errors))
    }
}

/// The validators declared for one route.
pub trait RuleSet: Send + Sync + 'static {
    fn validators(config: &ValidationConfig) -> Vec<Box<dyn Validator>>;
}

/// `POST /products`
pub struct CreateRules;

/// `PUT /products/:id`
pub struct UpdateRules;

/// `GET /products/:id`
pub struct ReadRules;

/// `DELETE /products/:id`
pub struct DeleteRules;

/// `GET /products`
pub struct NoRules;

impl RuleSet for CreateRules {
    fn validators(_config: &ValidationConfig) -> Vec<Box<dyn Validator>> {
        vec![
            Box::new(FieldChain::body("name").not_empty("Name cannot be empty")),
            Box::new(
                FieldChain::body("price")
                    .not_empty("Price must not be empty")
                    .numeric("price must be a number")
                    .greater_than_zero("Price must be greater than 0"),
            ),
        ]
    }
}

impl RuleSet for UpdateRules {
    fn validators(config: &ValidationConfig) -> Vec<Box<dyn Validator>> {
        let mut validators: Vec<Box<dyn Validator>> = vec![
            Box::new(FieldChain::param("id").integer("Provided Id is not valid")),
            Box::new(
                FieldChain::body("price")
                    .numeric("Price must be a number")
                    .greater_than_zero("Price must be greater than 0"),
            ),
            Box::new(FieldChain::body("availability").boolean("This field must be of boolean type")),
        ];
        if config.strict_update_name {
            validators.push(Box::new(FieldChain::body("name").not_empty("Name cannot be empty")));
        }
        validators
    }
}

impl RuleSet for ReadRules {
    fn validators(_config: &ValidationConfig) -> Vec<Box<dyn Validator>> {
        vec![Box::new(FieldChain::param("id").integer("The id provided is not valid"))]
    }
}

impl RuleSet for DeleteRules {
    fn validators(_config: &ValidationConfig) -> Vec<Box<dyn Validator>> {
        vec![Box::new(FieldChain::param("id").integer("The provided Id is not valid"))]
    }
}

impl RuleSet for NoRules {
    fn validators(_config: &ValidationConfig) -> Vec<Box<dyn Validator>> {
        Vec::new()
    }
}
