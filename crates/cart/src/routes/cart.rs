//! Cart route handlers.
//!
//! Thin boundary over [`crate::service::CartService`]: deserialization and
//! parameter checks happen here, every decision about cart state happens in
//! the service. Mutations answer 204 with no body; the list endpoint
//! answers with the page JSON shape described in [`crate::models::Page`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use paddock_core::{ProductId, UserKey};

use crate::error::{AppError, Result};
use crate::models::{CartLineView, Page, PageRequest};
use crate::state::AppState;

/// Add-to-cart request body.
///
/// `quantity` is a signed delta; a result of zero or below removes the
/// product from the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub user_key: String,
    pub product_id: i64,
    pub quantity: i32,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_key: String,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Query parameters carrying only the user key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub user_key: String,
}

fn parse_user_key(raw: &str) -> Result<UserKey> {
    UserKey::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Build the page request from optional `page`/`size` parameters.
///
/// Both present selects a window; anything else falls back to an unpaged
/// read. A zero page size is rejected.
fn parse_page_request(page: Option<u32>, size: Option<u32>) -> Result<Option<PageRequest>> {
    match (page, size) {
        (Some(page), Some(size)) => {
            if size == 0 {
                return Err(AppError::BadRequest("Page size must be positive".to_owned()));
            }
            Ok(Some(PageRequest::new(page, size)))
        }
        _ => Ok(None),
    }
}

/// List the user's cart (paginated).
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<CartLineView>>> {
    let user_key = parse_user_key(&params.user_key)?;
    let request = parse_page_request(params.page, params.size)?;

    let page = state.cart().list_cart(&user_key, request).await?;
    Ok(Json(page))
}

/// Add a quantity delta of a product to the user's cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<StatusCode> {
    let user_key = parse_user_key(&body.user_key)?;

    state
        .cart()
        .add_to_cart(&user_key, ProductId::new(body.product_id), body.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a product from the user's cart. Idempotent.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Query(params): Query<UserParams>,
) -> Result<StatusCode> {
    let user_key = parse_user_key(&params.user_key)?;

    state
        .cart()
        .remove_from_cart(&user_key, ProductId::new(product_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the user's cart. Idempotent.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<StatusCode> {
    let user_key = parse_user_key(&params.user_key)?;

    state.cart().clear_cart(&user_key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_requires_both_parameters() {
        assert_eq!(parse_page_request(None, None).unwrap(), None);
        assert_eq!(parse_page_request(Some(0), None).unwrap(), None);
        assert_eq!(parse_page_request(None, Some(5)).unwrap(), None);
        assert_eq!(
            parse_page_request(Some(2), Some(5)).unwrap(),
            Some(PageRequest::new(2, 5))
        );
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(parse_page_request(Some(0), Some(0)).is_err());
    }

    #[test]
    fn test_empty_user_key_is_rejected() {
        assert!(parse_user_key("").is_err());
        assert!(parse_user_key("vasya@gmail.com").is_ok());
    }
}
