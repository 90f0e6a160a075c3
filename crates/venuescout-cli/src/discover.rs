use std::time::Duration;

use anyhow::Context;
use venuescout_core::{load_venues_file, today_stamp, AppConfig, NameFilter};
use venuescout_places::{discover_venues, PlacesClient, RetryPolicy};

use crate::{emit_report, print_summary, RunArgs};

/// Discover venues through the places API and overwrite the report.
///
/// The API key is checked before anything else so a missing credential
/// fails without network activity. Any search or detail failure aborts the
/// run and leaves the existing report untouched.
///
/// # Errors
///
/// Returns an error if the API key is missing, the config file is invalid,
/// any API request fails, or the report cannot be written.
pub(crate) async fn run_discover(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let api_key = config.require_places_api_key()?;

    let venues_file = load_venues_file(&config.config_path)?;
    let discovery = venues_file.discovery;
    let filter = NameFilter::new(&discovery.name_tokens);

    let client = PlacesClient::new(api_key, config.request_timeout_secs)
        .context("failed to build places client")?
        .with_retry_policy(RetryPolicy {
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        })
        .with_page_token_delay(Duration::from_millis(config.page_token_delay_ms));

    tracing::info!(queries = discovery.queries.len(), "starting discovery");
    let outcome = discover_venues(&client, &discovery.queries, &filter, &today_stamp())
        .await
        .context("venue discovery failed")?;

    let path = args.output_path(config);
    emit_report(&outcome.report, path, args.dry_run, &mut std::io::stdout())?;

    print_summary(
        args.dry_run,
        &format!(
            "Discovered {} venues ({} places searched, {} details fetched) -> {}",
            outcome.report.events.len(),
            outcome.places_seen,
            outcome.details_fetched,
            path.display()
        ),
    );
    Ok(())
}
