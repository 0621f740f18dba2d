use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{Result, SearchError};
use crate::model::SearchRequest;

const QUERY_KEY: &str = "query";
const LOCATION_KEY: &str = "location";
const PLACEHOLDER_PATTERN: &str = r"\{(\w*)\}";

/// Location token in the form the results page expects, e.g. `athens%2C+OH`.
///
/// City and state are inserted verbatim; callers trim them beforehand.
pub fn build_location(city: &str, state: &str) -> String {
    format!("{city}%2C+{state}")
}

/// Query token: every word of every term joined by `+`.
///
/// `["Data Science", "Python"]` becomes `Data+Science+Python`; no terms yields an empty string.
pub fn build_query<S: AsRef<str>>(search_terms: &[S]) -> String {
    search_terms
        .iter()
        .flat_map(|term| term.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join("+")
}

/// Substitutes both tokens into `template`.
///
/// The template must contain exactly the `{query}` and `{location}` placeholders; a missing
/// or unrecognised placeholder is an error rather than a partially formatted URL.
pub fn build_search_url(template: &str, location: &str, query: &str) -> Result<String> {
    let pattern = placeholder_regex(template)?;
    validate_placeholders(template, &pattern)?;

    let url = pattern.replace_all(template, |caps: &Captures| match &caps[1] {
        QUERY_KEY => query.to_string(),
        _ => location.to_string(),
    });
    Ok(url.into_owned())
}

fn placeholder_regex(template: &str) -> Result<Regex> {
    Regex::new(PLACEHOLDER_PATTERN).map_err(|err| SearchError::Template {
        template: template.to_string(),
        reason: err.to_string(),
    })
}

fn validate_placeholders(template: &str, pattern: &Regex) -> Result<()> {
    let mut has_query = false;
    let mut has_location = false;

    for caps in pattern.captures_iter(template) {
        match &caps[1] {
            QUERY_KEY => has_query = true,
            LOCATION_KEY => has_location = true,
            other => {
                return Err(SearchError::Template {
                    template: template.to_string(),
                    reason: format!("unknown placeholder `{{{other}}}`"),
                })
            }
        }
    }

    let missing: Vec<&str> = [(has_query, QUERY_KEY), (has_location, LOCATION_KEY)]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, key)| key)
        .collect();
    if !missing.is_empty() {
        return Err(SearchError::Template {
            template: template.to_string(),
            reason: format!("missing placeholder(s): {}", missing.join(", ")),
        });
    }
    Ok(())
}

/// Builds search URLs against one configured template.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    template: String,
}

impl UrlBuilder {
    /// Checks the template once so a bad configuration fails before any input is collected.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let pattern = placeholder_regex(&template)?;
        validate_placeholders(&template, &pattern)?;
        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn url_for(&self, request: &SearchRequest) -> Result<String> {
        let location = build_location(&request.city, &request.state);
        let query = build_query(&request.search_terms);
        debug!(%location, %query, "formatted search tokens");
        build_search_url(&self.template, &location, &query)
    }
}
