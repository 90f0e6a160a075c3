//! The `scrape` and `refresh` commands.
//!
//! Both enrich a known venue list with a phone number scraped from each
//! venue's page. A failed page fetch never aborts the run: `scrape` records a
//! placeholder and `refresh` keeps whatever the report already had.

use anyhow::Context;
use venuescout_core::{
    load_venues_file, read_report, today_stamp, AppConfig, Event, Report, StaticVenue,
};
use venuescout_scraper::{PageClient, PhoneLookup};

use crate::{emit_report, print_summary, RunArgs};

const PHONE_NOT_FOUND: &str = "Phone not found";
const PHONE_UNAVAILABLE: &str = "Unavailable";

/// Scrape each configured venue page for a phone number.
///
/// Events keep the order of the configured venue list.
pub(crate) async fn scrape_static_venues(
    client: &PageClient,
    venues: &[StaticVenue],
    last_updated: &str,
) -> Report {
    let mut events = Vec::with_capacity(venues.len());

    for venue in venues {
        let phone = match client.scrape_phone(&venue.url).await {
            PhoneLookup::Found(phone) => phone,
            PhoneLookup::NotFound => PHONE_NOT_FOUND.to_string(),
            PhoneLookup::Unavailable => PHONE_UNAVAILABLE.to_string(),
        };
        tracing::info!(venue = %venue.name, %phone, "venue scraped");

        events.push(Event {
            venue: venue.name.clone(),
            venue_url: venue.url.clone(),
            phone,
            address: None,
            band: venue.band.clone(),
            band_url: venue.band_url.clone(),
            time: venue.time.clone(),
        });
    }

    Report::in_order(last_updated, events)
}

/// Re-scrape the phone number of every event in `prior`.
///
/// A number found on the page replaces the old one; otherwise the prior
/// phone is kept. All other fields and the event order carry over unchanged.
pub(crate) async fn refresh_report(
    client: &PageClient,
    prior: Report,
    last_updated: &str,
) -> Report {
    let mut events = prior.events;

    for event in &mut events {
        match client.scrape_phone(&event.venue_url).await {
            PhoneLookup::Found(phone) => {
                if phone != event.phone {
                    tracing::info!(
                        venue = %event.venue,
                        old = %event.phone,
                        new = %phone,
                        "phone updated"
                    );
                }
                event.phone = phone;
            }
            PhoneLookup::NotFound | PhoneLookup::Unavailable => {
                tracing::info!(
                    venue = %event.venue,
                    phone = %event.phone,
                    "keeping previous phone"
                );
            }
        }
    }

    Report::in_order(last_updated, events)
}

/// Build the report from the static venue list in the config file.
///
/// # Errors
///
/// Returns an error if the config file is invalid, the page client cannot be
/// built, or the report cannot be written. Page fetch failures are not errors.
pub(crate) async fn run_scrape(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let venues_file = load_venues_file(&config.config_path)?;
    if venues_file.venues.is_empty() {
        tracing::warn!(path = %config.config_path.display(), "no static venues configured");
    }

    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build page client")?;
    let report = scrape_static_venues(&client, &venues_file.venues, &today_stamp()).await;

    let path = args.output_path(config);
    emit_report(&report, path, args.dry_run, &mut std::io::stdout())?;
    print_summary(
        args.dry_run,
        &format!("Updated {} ({} venues)", path.display(), report.events.len()),
    );
    Ok(())
}

/// Refresh phone numbers in the existing report.
///
/// # Errors
///
/// Returns an error if the existing report cannot be read, the page client
/// cannot be built, or the report cannot be written.
pub(crate) async fn run_refresh(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let path = args.output_path(config);
    let prior = read_report(path)
        .with_context(|| format!("cannot refresh: failed to read {}", path.display()))?;

    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build page client")?;
    let report = refresh_report(&client, prior, &today_stamp()).await;

    emit_report(&report, path, args.dry_run, &mut std::io::stdout())?;
    print_summary(
        args.dry_run,
        &format!("Updated {} ({} venues)", path.display(), report.events.len()),
    );
    Ok(())
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
