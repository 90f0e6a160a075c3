//! Conversion of place details into report events.

use venuescout_core::Event;

use crate::types::PlaceDetail;

/// Band, band URL and time are not known to the places service.
pub const BAND_PLACEHOLDER: &str = "TBD";
pub const TIME_PLACEHOLDER: &str = "TBD";
pub const PHONE_PLACEHOLDER: &str = "Phone not found";

/// Builds a report [`Event`] from a place detail record.
///
/// The venue URL prefers the place's own website and falls back to its maps
/// listing. Blank fields are replaced with placeholders, except the address,
/// which is left out.
#[must_use]
pub fn event_from_detail(detail: &PlaceDetail) -> Event {
    let venue_url = [&detail.website, &detail.url]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();

    let phone = match detail.formatted_phone_number.trim() {
        "" => PHONE_PLACEHOLDER.to_string(),
        p => p.to_string(),
    };

    let address = match detail.formatted_address.trim() {
        "" => None,
        a => Some(a.to_string()),
    };

    Event {
        venue: detail.name.trim().to_string(),
        venue_url,
        phone,
        address,
        band: BAND_PLACEHOLDER.to_string(),
        band_url: String::new(),
        time: TIME_PLACEHOLDER.to_string(),
    }
}
