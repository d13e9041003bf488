//! Property handlers: listing, detail, toggle, delete, aggregates.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CitiesResponse, MessageResponse, PaginationParams, PropertyListResponse, PropertyQuery,
    ToggleResponse,
};
use crate::app_state::AppState;
use crate::domain::{Property, PropertyFilter, PropertyId, PropertySummaryStats, StatusFilter};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /properties` — Filtered, paginated property listing.
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    summary = "List properties",
    description = "Returns listings matching the optional city, status, and free-text filters, newest first, paginated.",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Paginated listing", body = PropertyListResponse),
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> impl IntoResponse {
    let pagination = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(20),
    }
    .clamped();

    let filter = PropertyFilter {
        city: query.city,
        status: query.status.as_deref().and_then(StatusFilter::parse),
        search: query.search,
    };
    let matched = state.service.properties().list(&filter).await;

    let total = matched.len() as u32;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(pagination.limit)
    };
    // Offset math in u64: page * limit can exceed u32 for hostile pages.
    let offset = u64::from(pagination.page - 1) * u64::from(pagination.limit);
    let start = usize::try_from(offset).unwrap_or(usize::MAX);
    let properties: Vec<Property> = matched
        .into_iter()
        .skip(start)
        .take(pagination.limit as usize)
        .collect();

    Json(PropertyListResponse {
        properties,
        total,
        page: pagination.page,
        total_pages,
    })
}

/// `GET /properties/:id` — Single listing.
///
/// # Errors
///
/// Returns [`GatewayError::PropertyNotFound`] if the listing does not exist.
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    summary = "Get a property",
    params(
        ("id" = String, Path, description = "Listing ID"),
    ),
    responses(
        (status = 200, description = "Listing details", body = Property),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<PropertyId>,
) -> Result<impl IntoResponse, GatewayError> {
    let property = state.service.properties().get(&id).await?;
    Ok(Json(property))
}

/// `POST /properties/:id/toggle` — Flip the active flag.
///
/// # Errors
///
/// Returns [`GatewayError::PropertyNotFound`] if the listing does not exist.
#[utoipa::path(
    post,
    path = "/api/properties/{id}/toggle",
    tag = "Properties",
    summary = "Toggle a property's active state",
    description = "Flips whether the listing participates in automated posting runs.",
    params(
        ("id" = String, Path, description = "Listing ID"),
    ),
    responses(
        (status = 200, description = "New active state", body = ToggleResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn toggle_property(
    State(state): State<AppState>,
    Path(id): Path<PropertyId>,
) -> Result<impl IntoResponse, GatewayError> {
    let is_active = state.service.properties().toggle_active(&id).await?;
    let message = if is_active {
        "property activated"
    } else {
        "property deactivated"
    };
    Ok(Json(ToggleResponse {
        id,
        is_active,
        message: message.to_string(),
    }))
}

/// `DELETE /properties/:id` — Remove a listing.
///
/// # Errors
///
/// Returns [`GatewayError::PropertyNotFound`] if the listing does not exist.
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "Properties",
    summary = "Delete a property",
    params(
        ("id" = String, Path, description = "Listing ID"),
    ),
    responses(
        (status = 200, description = "Listing removed", body = MessageResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<PropertyId>,
) -> Result<impl IntoResponse, GatewayError> {
    let removed = state.service.properties().remove(&id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "property '{}' deleted",
        removed.title
    ))))
}

/// `GET /properties/cities/list` — Distinct cities.
#[utoipa::path(
    get,
    path = "/api/properties/cities/list",
    tag = "Properties",
    summary = "List cities",
    description = "Returns the sorted list of distinct cities with at least one listing.",
    responses(
        (status = 200, description = "City list", body = CitiesResponse),
    )
)]
pub async fn list_cities(State(state): State<AppState>) -> impl IntoResponse {
    Json(CitiesResponse {
        cities: state.service.properties().cities().await,
    })
}

/// `GET /properties/stats/summary` — Aggregate listing statistics.
#[utoipa::path(
    get,
    path = "/api/properties/stats/summary",
    tag = "Properties",
    summary = "Property summary statistics",
    description = "Returns total/active counts, per-city counts, and the nightly-price histogram.",
    responses(
        (status = 200, description = "Summary statistics", body = PropertySummaryStats),
    )
)]
pub async fn property_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.properties().summary().await)
}

/// Property routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/properties/{id}", get(get_property).delete(delete_property))
        .route("/properties/{id}/toggle", post(toggle_property))
        .route("/properties/cities/list", get(list_cities))
        .route("/properties/stats/summary", get(property_summary))
}
