//! DTOs for the property endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Property, PropertyId};

/// Query parameters for `GET /api/properties`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PropertyQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub limit: Option<u32>,
    /// Case-insensitive exact city match.
    pub city: Option<String>,
    /// `"active"` or `"inactive"`; anything else means no filtering.
    pub status: Option<String>,
    /// Free-text search over title and city.
    pub search: Option<String>,
}

/// Paginated property listing response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    /// Listings on this page, newest first.
    pub properties: Vec<Property>,
    /// Total matching listings across all pages.
    pub total: u32,
    /// Current page number.
    pub page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

/// Response for `POST /api/properties/{id}/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Toggled listing ID.
    pub id: PropertyId,
    /// New active state.
    pub is_active: bool,
    /// Human-readable result description.
    pub message: String,
}

/// Response for `GET /api/properties/cities/list`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitiesResponse {
    /// Distinct cities with at least one listing, sorted.
    pub cities: Vec<String>,
}
