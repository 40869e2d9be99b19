//! Request extractors.

mod json_body;
mod validated;
pub use json_body::JsonBody;
pub use validated::Validated;
