//! Type-safe property identifier.
//!
//! [`PropertyId`] is a newtype wrapper around the listing identifier
//! assigned upstream by the scraping pipeline (an opaque string such as
//! `"stay-48291"`), providing type safety so that property identifiers
//! cannot be confused with other strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a marketed property.
///
/// Assigned once when the listing enters the system and immutable
/// thereafter. Used as the dictionary key in [`super::PropertyStore`]
/// and as the correlation field on posting records and notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Creates a `PropertyId` from a raw listing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PropertyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
