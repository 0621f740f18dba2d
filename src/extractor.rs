//! Job posting extraction from a results page.
//!
//! Postings are the anchors carrying the site's job-title marker attribute. Each anchor's
//! site-relative `href` is joined to the configured home URL. Matches are taken in document
//! order; there is no ranking beyond what the page itself provides.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::error::{Result, SearchError};
use crate::model::JobListing;

#[derive(Debug, Clone)]
pub struct Extractor {
    selector: Selector,
    home_url: String,
}

impl Extractor {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let selector_str = format!(
            r#"a[{}="{}"]"#,
            config.marker_attribute,
            config.marker_value.replace('"', "\\\"")
        );
        let selector = Selector::parse(&selector_str).map_err(|err| SearchError::Marker {
            selector: selector_str.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            selector,
            home_url: config.home_url.clone(),
        })
    }

    /// Returns at most `max_results` listings. Malformed markup is parsed leniently.
    pub fn extract(&self, raw_html: &str, max_results: usize) -> Vec<JobListing> {
        if max_results == 0 {
            return Vec::new();
        }

        let document = Html::parse_document(raw_html);
        let mut listings = Vec::with_capacity(max_results);

        for anchor in document.select(&self.selector) {
            let Some(href) = anchor.value().attr("href") else {
                warn!("job title anchor without href, skipping");
                continue;
            };

            listings.push(JobListing::new(format!("{}{}", self.home_url, href)));
            if listings.len() == max_results {
                break;
            }
        }

        debug!(found = listings.len(), max_results, "extracted job listings");
        listings
    }
}

/// One-shot extraction using `config`'s marker and home URL.
pub fn extract(config: &SiteConfig, raw_html: &str, max_results: usize) -> Result<Vec<JobListing>> {
    Ok(Extractor::new(config)?.extract(raw_html, max_results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: usize) -> String {
        let mut html = String::from("<html><body><div id=\"results\">");
        for i in 0..count {
            html.push_str(&format!(
                "<div class=\"row\"><a data-tn-element=\"jobTitle\" href=\"/rc/clk?jk={i}\">Job {i}</a>\
                 <a href=\"/cmp/company-{i}\">Company</a></div>"
            ));
        }
        html.push_str("</div></body></html>");
        html
    }

    fn extractor() -> Extractor {
        Extractor::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn truncates_in_document_order() {
        let listings = extractor().extract(&page(8), 5);
        let urls: Vec<_> = listings.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.indeed.com/rc/clk?jk=0",
                "https://www.indeed.com/rc/clk?jk=1",
                "https://www.indeed.com/rc/clk?jk=2",
                "https://www.indeed.com/rc/clk?jk=3",
                "https://www.indeed.com/rc/clk?jk=4",
            ]
        );
    }

    #[test]
    fn returns_all_when_fewer_than_requested() {
        assert_eq!(extractor().extract(&page(2), 10).len(), 2);
    }

    #[test]
    fn never_exceeds_cap() {
        let extractor = extractor();
        for matches in 0..6 {
            for cap in 0..8 {
                let found = extractor.extract(&page(matches), cap).len();
                assert_eq!(found, matches.min(cap), "matches={matches} cap={cap}");
            }
        }
    }

    #[test]
    fn no_matches_is_empty() {
        let html = "<html><body><a href=\"/jobs\">Other</a></body></html>";
        assert!(extractor().extract(html, 5).is_empty());
    }

    #[test]
    fn anchors_without_href_are_skipped() {
        let html = r#"<a data-tn-element="jobTitle">No link</a>
                      <a data-tn-element="jobTitle" href="/a">A</a>
                      <a data-tn-element="jobTitle" href="/b">B</a>"#;
        let listings = extractor().extract(html, 2);
        assert_eq!(
            listings,
            vec![
                JobListing::new("https://www.indeed.com/a"),
                JobListing::new("https://www.indeed.com/b"),
            ]
        );
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = r#"<div><a data-tn-element="jobTitle" href="/x">X<div><p>unclosed"#;
        assert_eq!(extractor().extract(html, 3), vec![JobListing::new("https://www.indeed.com/x")]);
    }

    #[test]
    fn unparsable_marker_is_a_marker_error() {
        let config = SiteConfig {
            marker_attribute: String::new(),
            ..SiteConfig::default()
        };
        match Extractor::new(&config).unwrap_err() {
            SearchError::Marker { selector, .. } => assert_eq!(selector, r#"a[="jobTitle"]"#),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn uses_configured_marker_and_origin() {
        let config = SiteConfig {
            home_url: "http://localhost:8080".into(),
            marker_attribute: "data-testid".into(),
            marker_value: "job-link".into(),
            ..SiteConfig::default()
        };
        let html = r#"<a data-testid="job-link" href="/j/1">1</a><a data-tn-element="jobTitle" href="/j/2">2</a>"#;
        let listings = extract(&config, html, 5).unwrap();
        assert_eq!(listings, vec![JobListing::new("http://localhost:8080/j/1")]);
    }
}
