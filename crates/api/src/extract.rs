//! Request extractors that fail with `ApiError` instead of axum's plain-text rejections.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::{self, Deserializer};

use trivia_core::PageRequest;

use crate::error::ApiError;

/// JSON body; any decoding failure is reported as 422.
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "rejected request body");
                Err(ApiError::Unprocessable)
            }
        }
    }
}

/// The `page` query parameter; anything unusable means page 1.
pub(crate) struct Page(pub PageRequest);

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .map_or_else(PageRequest::first, |Query(params)| {
                PageRequest::from_param(params.get("page").map(String::as_str))
            });
        Ok(Self(page))
    }
}

/// A non-negative integer sent either as a JSON number or a numeric string.
///
/// Browser clients post form values such as `"5"` for ids and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LenientU64(pub u64);

impl<'de> Deserialize<'de> for LenientU64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("expected an integer, got {text:?}"))),
        }
    }
}
