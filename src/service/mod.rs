//! Product persistence and request validation.

mod crud;
mod validation;
pub use crud::{PgProductRepository, ProductRepository};
pub use validation::{
    gate, CreateRules, DeleteRules, FieldChain, FieldError, Location, NoRules, ReadRules, RequestData, RuleSet,
    UpdateRules, Validator,
};
