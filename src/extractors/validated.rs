//! Runs a route's validators over path params and body before the handler sees them.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::service::{gate, RequestData, RuleSet};
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

/// A request that passed the validators of `R`.
pub struct Validated<R> {
    pub params: HashMap<String, String>,
    pub body: Value,
    _rules: PhantomData<R>,
}

impl<R> Validated<R> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[async_trait]
impl<R: RuleSet> FromRequest<AppState> for Validated<R> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(p)| p)
            .unwrap_or_default();
        let JsonBody(body) = JsonBody::from_request(Request::from_parts(parts, body), state).await?;

        let validators = R::validators(&state.config.validation);
        gate(&validators, &RequestData { body: &body, params: &params })?;
        Ok(Validated {
            params,
            body,
            _rules: PhantomData,
        })
    }
}
