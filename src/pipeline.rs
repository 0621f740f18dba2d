//! Search run orchestration.
//!
//! A run moves strictly forward through
//! `CollectingInput -> BuildingUrl -> Fetching -> Extracting -> Presenting -> Done`.
//! Closing the form or a failed fetch ends the run in `Aborted` without touching the
//! later stages. Nothing is retried.

use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::error::{Result, SearchError};
use crate::extractor::Extractor;
use crate::fetcher::{FetchFailure, FetchResult, PageFetcher};
use crate::form::InputCollector;
use crate::model::{JobListing, SearchRequest};
use crate::presenter::{present, BrowserLauncher};
use crate::url_builder::UrlBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectingInput,
    BuildingUrl,
    Fetching,
    Extracting,
    Presenting,
    Done,
    Aborted,
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The user closed the form; nothing was fetched.
    Cancelled,
    /// Every stage ran; holds the listings that were opened.
    Completed(Vec<JobListing>),
}

pub struct Pipeline<C, F, L> {
    collector: C,
    fetcher: F,
    launcher: L,
    url_builder: UrlBuilder,
    extractor: Extractor,
    stage: Stage,
}

impl<C, F, L> Pipeline<C, F, L>
where
    C: InputCollector,
    F: PageFetcher,
    L: BrowserLauncher,
{
    /// Validates the site's URL template and marker before any input is collected.
    pub fn new(collector: C, fetcher: F, launcher: L, site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            collector,
            fetcher,
            launcher,
            url_builder: UrlBuilder::new(site.search_url_template.clone())?,
            extractor: Extractor::new(site)?,
            stage: Stage::CollectingInput,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Collects a request from the form and runs the search for it.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.stage = Stage::CollectingInput;

        let request = match self.collector.collect_input() {
            Ok(Some(request)) => request,
            Ok(None) => {
                info!("search cancelled");
                self.advance(Stage::Aborted);
                return Ok(RunOutcome::Cancelled);
            }
            Err(e) => {
                self.advance(Stage::Aborted);
                return Err(e);
            }
        };

        self.search(&request)
    }

    /// Runs every stage after input collection for an already known request.
    pub fn search(&mut self, request: &SearchRequest) -> Result<RunOutcome> {
        self.advance(Stage::BuildingUrl);
        let url = match self.url_builder.url_for(request) {
            Ok(url) => url,
            Err(e) => {
                self.advance(Stage::Aborted);
                return Err(e);
            }
        };
        info!(%url, "searching");

        self.advance(Stage::Fetching);
        let raw_html = match self.fetcher.fetch(&url) {
            FetchResult::Success(body) => body,
            FetchResult::Failure(failure) => {
                self.advance(Stage::Aborted);
                return Err(match failure {
                    FetchFailure::ConnectionError(reason) => SearchError::Connection { url, reason },
                    FetchFailure::HttpError(status) => SearchError::Http(status),
                });
            }
        };

        self.advance(Stage::Extracting);
        let listings = self.extractor.extract(&raw_html, request.max_results);
        info!(count = listings.len(), "found job listings");

        self.advance(Stage::Presenting);
        present(&listings, &self.launcher);

        self.advance(Stage::Done);
        Ok(RunOutcome::Completed(listings))
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, "pipeline stage");
        self.stage = next;
    }
}
