//! Target site settings.
//!
//! Everything that couples the tool to Indeed.com's URLs and markup lives here so it
//! can be swapped out (a local server in tests, a mirror, a changed results page).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

pub const DEFAULT_SEARCH_URL_TEMPLATE: &str = "https://www.indeed.com/jobs?q={query}&l={location}";
pub const DEFAULT_HOME_URL: &str = "https://www.indeed.com";
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-tn-element";
pub const DEFAULT_MARKER_VALUE: &str = "jobTitle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Results page URL with `{query}` and `{location}` placeholders.
    pub search_url_template: String,
    /// Origin prepended to the site-relative `href` of each posting.
    pub home_url: String,
    /// Attribute name identifying job-title anchors.
    pub marker_attribute: String,
    /// Attribute value identifying job-title anchors.
    pub marker_value: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url_template: DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
            home_url: DEFAULT_HOME_URL.to_string(),
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            marker_value: DEFAULT_MARKER_VALUE.to_string(),
        }
    }
}

impl SiteConfig {
    /// Reads a JSON config file. Missing keys fall back to the Indeed.com defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SearchError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SearchError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Points the config at another site origin, keeping the `/jobs` path layout.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            search_url_template: format!("{origin}/jobs?q={{query}}&l={{location}}"),
            home_url: origin.to_string(),
            ..Self::default()
        }
    }
}
