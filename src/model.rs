use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Parameters for one job search, handed over by the input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub city: String,
    pub state: String,
    pub search_terms: Vec<String>,
    pub max_results: usize,
}

impl SearchRequest {
    /// Builds a request. Only the result cap is checked; city and state are taken verbatim.
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        search_terms: Vec<String>,
        max_results: usize,
    ) -> Result<Self> {
        if max_results == 0 {
            return Err(SearchError::InvalidRequest(
                "number of results must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            city: city.into(),
            state: state.into(),
            search_terms,
            max_results,
        })
    }
}

/// Absolute URL of one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub url: String,
}

impl JobListing {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Splits a comma separated line into trimmed search terms, dropping empty entries.
pub fn parse_search_terms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(String::from)
        .collect()
}
