use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A hand-maintained venue scraped by the `scrape` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticVenue {
    pub name: String,
    pub url: String,
    pub band: String,
    pub band_url: String,
    pub time: String,
}

/// Search queries and name allow-list used by the `discover` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub queries: Vec<String>,
    pub name_tokens: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            queries: vec![
                "VFW live music Minnesota".to_string(),
                "American Legion live music Minnesota".to_string(),
                "VFW post bands Minnesota".to_string(),
            ],
            name_tokens: vec![
                "VFW".to_string(),
                "American Legion".to_string(),
                "Post".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VenuesFile {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub venues: Vec<StaticVenue>,
}

/// Load and validate the venues configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_venues_file(path: &Path) -> Result<VenuesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VenuesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_venues_file(&content)
}

fn parse_venues_file(content: &str) -> Result<VenuesFile, ConfigError> {
    let venues_file: VenuesFile = serde_yaml::from_str(content)?;
    validate_venues_file(&venues_file)?;
    Ok(venues_file)
}

fn validate_venues_file(venues_file: &VenuesFile) -> Result<(), ConfigError> {
    let discovery = &venues_file.discovery;

    if discovery.queries.is_empty() {
        return Err(ConfigError::Validation(
            "discovery.queries must list at least one query".to_string(),
        ));
    }
    if discovery.queries.iter().any(|q| q.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "discovery.queries must not contain blank entries".to_string(),
        ));
    }
    if discovery.name_tokens.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "discovery.name_tokens must not contain blank entries".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for venue in &venues_file.venues {
        if venue.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "venue name must be non-empty".to_string(),
            ));
        }
        if venue.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "venue '{}' has an empty url",
                venue.name
            )));
        }
        if !seen_names.insert(venue.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate venue name: '{}'",
                venue.name
            )));
        }
    }

    Ok(())
}
