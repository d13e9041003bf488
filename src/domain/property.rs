//! Property listing aggregate with marketing metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PropertyId;

/// A marketed property listing as ingested by the scraping pipeline.
///
/// Stored in the [`super::PropertyStore`]; `is_active` controls whether
/// the listing participates in automated posting runs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Property {
    /// Unique listing identifier (immutable after ingestion).
    pub id: PropertyId,
    /// Listing title.
    pub title: String,
    /// City the property is located in.
    pub city: String,
    /// Nightly price in the smallest currency unit (e.g. KRW).
    pub price_per_night: u64,
    /// Guest rating, 0.0–5.0.
    pub rating: f64,
    /// Maximum number of guests.
    pub max_guests: u32,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Listed amenities.
    pub amenities: Vec<String>,
    /// Image URLs collected by the scraper.
    pub images: Vec<String>,
    /// Whether the listing participates in posting runs.
    pub is_active: bool,
    /// Ingestion timestamp (immutable after ingestion).
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last scrape of this listing.
    pub scraped_at: DateTime<Utc>,
}

impl Property {
    /// Returns `true` if the listing matches a case-insensitive free-text
    /// search over title and city.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.city.to_lowercase().contains(&needle)
    }
}
