//! Places web service response types.
//!
//! Every response carries a top-level `status` string. Fields the service
//! may omit or send as `null` read as their default value, so a sparse
//! record degrades to empty strings instead of failing the run.

use serde::{Deserialize, Deserializer};

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// textsearch
// ---------------------------------------------------------------------------

/// One page of a `textsearch/json` response.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Place>,
    /// Present when more pages exist. Not usable until a short delay has passed.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A place summary from a search page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

/// A `details/json` response.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetail>,
}

/// Expanded record for a single place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formatted_phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formatted_address: String,
    /// Maps listing for the place.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}
