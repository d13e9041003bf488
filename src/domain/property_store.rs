//! Concurrent in-memory property storage.
//!
//! [`PropertyStore`] holds all known listings behind a
//! [`tokio::sync::RwLock`]. Listings enter through the scraping pipeline
//! boundary ([`PropertyStore::insert`]) and are read, toggled, and removed
//! by the REST layer.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::{Property, PropertyId};
use crate::error::GatewayError;

/// Status filter accepted by the property listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Only listings with `is_active == true`.
    Active,
    /// Only listings with `is_active == false`.
    Inactive,
}

impl StatusFilter {
    /// Parses the query-string value; anything other than
    /// `"active"`/`"inactive"` means no filtering.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Filter criteria for [`PropertyStore::list`].
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Case-insensitive exact city match.
    pub city: Option<String>,
    /// Active/inactive filter.
    pub status: Option<StatusFilter>,
    /// Case-insensitive free-text search over title and city.
    pub search: Option<String>,
}

/// Per-city listing counts for the summary endpoint.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CityStats {
    /// All listings in the city.
    pub total: u32,
    /// Active listings in the city.
    pub active: u32,
}

/// Nightly-price histogram buckets (smallest currency unit).
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct PriceRanges {
    /// Listings under 100 000 per night.
    pub under_100k: u32,
    /// Listings in \[100 000, 200 000).
    #[serde(rename = "100k_200k")]
    pub from_100k_to_200k: u32,
    /// Listings in \[200 000, 300 000).
    #[serde(rename = "200k_300k")]
    pub from_200k_to_300k: u32,
    /// Listings at or above 300 000 per night.
    pub over_300k: u32,
}

/// Aggregate listing statistics for `GET /api/properties/stats/summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummaryStats {
    /// Total number of listings.
    pub total: u32,
    /// Active listings.
    pub active: u32,
    /// Inactive listings.
    pub inactive: u32,
    /// Per-city counts.
    pub city_stats: HashMap<String, CityStats>,
    /// Price histogram.
    pub price_ranges: PriceRanges,
}

/// Central store for all known property listings.
#[derive(Debug, Default)]
pub struct PropertyStore {
    properties: RwLock<HashMap<PropertyId, Property>>,
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a listing (the scraper re-ingests on re-scrape).
    pub async fn insert(&self, property: Property) {
        let mut map = self.properties.write().await;
        map.insert(property.id.clone(), property);
    }

    /// Returns a clone of the listing with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PropertyNotFound`] if no such listing exists.
    pub async fn get(&self, id: &PropertyId) -> Result<Property, GatewayError> {
        let map = self.properties.read().await;
        map.get(id)
            .cloned()
            .ok_or_else(|| GatewayError::PropertyNotFound(id.to_string()))
    }

    /// Flips the `is_active` flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PropertyNotFound`] if no such listing exists.
    pub async fn toggle_active(&self, id: &PropertyId) -> Result<bool, GatewayError> {
        let mut map = self.properties.write().await;
        let property = map
            .get_mut(id)
            .ok_or_else(|| GatewayError::PropertyNotFound(id.to_string()))?;
        property.is_active = !property.is_active;
        Ok(property.is_active)
    }

    /// Removes a listing, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PropertyNotFound`] if no such listing exists.
    pub async fn remove(&self, id: &PropertyId) -> Result<Property, GatewayError> {
        let mut map = self.properties.write().await;
        map.remove(id)
            .ok_or_else(|| GatewayError::PropertyNotFound(id.to_string()))
    }

    /// Returns all listings matching the filter, sorted newest first.
    pub async fn list(&self, filter: &PropertyFilter) -> Vec<Property> {
        let map = self.properties.read().await;
        let mut matched: Vec<Property> = map
            .values()
            .filter(|p| {
                if let Some(city) = &filter.city
                    && !p.city.eq_ignore_ascii_case(city)
                {
                    return false;
                }
                match filter.status {
                    Some(StatusFilter::Active) if !p.is_active => return false,
                    Some(StatusFilter::Inactive) if p.is_active => return false,
                    _ => {}
                }
                if let Some(search) = &filter.search
                    && !p.matches_search(search)
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Returns the sorted list of distinct cities with at least one listing.
    pub async fn cities(&self) -> Vec<String> {
        let map = self.properties.read().await;
        let mut cities: Vec<String> = map
            .values()
            .map(|p| p.city.clone())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        cities.sort();
        cities
    }

    /// Computes the summary statistics over all listings.
    pub async fn summary(&self) -> PropertySummaryStats {
        let map = self.properties.read().await;
        let mut city_stats: HashMap<String, CityStats> = HashMap::new();
        let mut price_ranges = PriceRanges::default();
        let mut active = 0u32;

        for property in map.values() {
            let entry = city_stats.entry(property.city.clone()).or_default();
            entry.total += 1;
            if property.is_active {
                entry.active += 1;
                active += 1;
            }
            match property.price_per_night {
                p if p < 100_000 => price_ranges.under_100k += 1,
                p if p < 200_000 => price_ranges.from_100k_to_200k += 1,
                p if p < 300_000 => price_ranges.from_200k_to_300k += 1,
                _ => price_ranges.over_300k += 1,
            }
        }

        let total = map.len() as u32;
        PropertySummaryStats {
            total,
            active,
            inactive: total - active,
            city_stats,
            price_ranges,
        }
    }

    /// Returns the number of listings.
    pub async fn len(&self) -> usize {
        self.properties.read().await.len()
    }

    /// Returns `true` if the store contains no listings.
    pub async fn is_empty(&self) -> bool {
        self.properties.read().await.is_empty()
    }

    /// Returns the number of active listings.
    pub async fn active_count(&self) -> usize {
        let map = self.properties.read().await;
        map.values().filter(|p| p.is_active).count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn make_property(id: &str, city: &str, price: u64, active: bool) -> Property {
        Property {
            id: PropertyId::new(id),
            title: format!("Listing {id}"),
            city: city.to_string(),
            price_per_night: price,
            rating: 4.5,
            max_guests: 2,
            bedrooms: 1,
            bathrooms: 1,
            amenities: vec![],
            images: vec![],
            is_active: active,
            created_at: Utc::now(),
            scraped_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;

        let fetched = store.get(&PropertyId::new("stay-1")).await;
        let Ok(fetched) = fetched else {
            panic!("expected listing");
        };
        assert_eq!(fetched.city, "Seoul");
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let store = PropertyStore::new();
        let result = store.get(&PropertyId::new("missing")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn toggle_flips_active_flag() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;

        let id = PropertyId::new("stay-1");
        assert_eq!(store.toggle_active(&id).await.ok(), Some(false));
        assert_eq!(store.toggle_active(&id).await.ok(), Some(true));
    }

    #[tokio::test]
    async fn remove_deletes_listing() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;

        let id = PropertyId::new("stay-1");
        assert!(store.remove(&id).await.is_ok());
        assert!(store.get(&id).await.is_err());
        assert!(store.remove(&id).await.is_err());
    }

    #[tokio::test]
    async fn list_filters_by_city_and_status() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;
        store
            .insert(make_property("stay-2", "Busan", 150_000, true))
            .await;
        store
            .insert(make_property("stay-3", "Seoul", 250_000, false))
            .await;

        let filter = PropertyFilter {
            city: Some("seoul".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list(&filter).await.len(), 2);

        let filter = PropertyFilter {
            city: Some("Seoul".to_string()),
            status: Some(StatusFilter::Active),
            ..Default::default()
        };
        assert_eq!(store.list(&filter).await.len(), 1);
    }

    #[tokio::test]
    async fn list_free_text_search() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;
        store
            .insert(make_property("stay-2", "Busan", 150_000, true))
            .await;

        let filter = PropertyFilter {
            search: Some("busan".to_string()),
            ..Default::default()
        };
        let matched = store.list(&filter).await;
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().map(|p| p.city.as_str()), Some("Busan"));
    }

    #[tokio::test]
    async fn cities_are_distinct_and_sorted() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;
        store
            .insert(make_property("stay-2", "Busan", 150_000, true))
            .await;
        store
            .insert(make_property("stay-3", "Seoul", 250_000, false))
            .await;

        assert_eq!(store.cities().await, vec!["Busan", "Seoul"]);
    }

    #[tokio::test]
    async fn summary_buckets_prices() {
        let store = PropertyStore::new();
        store
            .insert(make_property("stay-1", "Seoul", 90_000, true))
            .await;
        store
            .insert(make_property("stay-2", "Busan", 150_000, true))
            .await;
        store
            .insert(make_property("stay-3", "Seoul", 250_000, false))
            .await;
        store
            .insert(make_property("stay-4", "Jeju", 400_000, true))
            .await;

        let summary = store.summary().await;
        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 3);
        assert_eq!(summary.inactive, 1);
        assert_eq!(summary.price_ranges.under_100k, 1);
        assert_eq!(summary.price_ranges.from_100k_to_200k, 1);
        assert_eq!(summary.price_ranges.from_200k_to_300k, 1);
        assert_eq!(summary.price_ranges.over_300k, 1);
        assert_eq!(summary.city_stats.get("Seoul").map(|c| c.total), Some(2));
    }
}
