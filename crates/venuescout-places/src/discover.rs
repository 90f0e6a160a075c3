//! The `discover` pipeline: search, deduplicate, fetch details, filter, report.
//!
//! Runs strictly in sequence: query by query, page by page, place by place.
//! Any API error aborts the run; nothing is written by this module.

use std::collections::HashSet;

use venuescout_core::{Event, NameFilter, Report};

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::normalize::event_from_detail;
use crate::types::Place;

/// Place identifiers already forwarded for detail fetch during this run.
#[derive(Debug, Default)]
pub struct SeenPlaces {
    ids: HashSet<String>,
}

impl SeenPlaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the place's identifier the first time it is seen.
    ///
    /// Places without an identifier (missing or blank) and repeats return
    /// `None`.
    pub fn first_sighting<'a>(&mut self, place: &'a Place) -> Option<&'a str> {
        let id = place.place_id.as_deref().map(str::trim)?;
        if id.is_empty() || !self.ids.insert(id.to_owned()) {
            return None;
        }
        Some(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Result of a discovery run, with counters for the summary line.
#[derive(Debug)]
pub struct DiscoveryOutcome {
    pub report: Report,
    /// Places returned across all queries and pages, before deduplication.
    pub places_seen: usize,
    /// Detail records fetched (one per unique identifier).
    pub details_fetched: usize,
}

/// Runs every query, fetches details for each unique place, and keeps the
/// places whose name passes `filter`.
///
/// Events are sorted by venue name; ties keep discovery order (query order,
/// then page order).
///
/// # Errors
///
/// Returns the first [`PlacesError`] from any search or detail request.
/// Results gathered before the failure are discarded.
pub async fn discover_venues<S: AsRef<str>>(
    client: &PlacesClient,
    queries: &[S],
    filter: &NameFilter,
    last_updated: &str,
) -> Result<DiscoveryOutcome, PlacesError> {
    let mut seen = SeenPlaces::new();
    let mut events: Vec<Event> = Vec::new();
    let mut places_seen = 0usize;
    let mut details_fetched = 0usize;

    for query in queries {
        let query = query.as_ref();
        let places = client.search_all(query).await?;
        tracing::info!(query, places = places.len(), "search complete");
        places_seen += places.len();

        for place in &places {
            let Some(place_id) = seen.first_sighting(place) else {
                continue;
            };

            let detail = client.place_details(place_id).await?;
            details_fetched += 1;

            if !filter.matches(&detail.name) {
                tracing::debug!(place_id, name = %detail.name, "excluded by name filter");
                continue;
            }

            tracing::debug!(place_id, name = %detail.name, "venue kept");
            events.push(event_from_detail(&detail));
        }
    }

    tracing::info!(
        places_seen,
        unique = seen.len(),
        details_fetched,
        kept = events.len(),
        "discovery finished"
    );

    Ok(DiscoveryOutcome {
        report: Report::new(last_updated, events),
        places_seen,
        details_fetched,
    })
}
