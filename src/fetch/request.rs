//! Page request construction and correlation tickets.
//!
//! Zellij delivers web responses as events, detached from the call that issued
//! the request. Every request therefore carries a [`FetchTicket`] in the
//! request context map, which the host hands back untouched with the result.

use std::collections::BTreeMap;
use url::Url;

const CONTEXT_RUN: &str = "tagtable_run";
const CONTEXT_PAGE: &str = "tagtable_page";

/// Static parameters of a fetch run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Tags endpoint, without the paging query.
    pub endpoint: String,
    /// Value of the `site` query parameter.
    pub site: String,
    /// Items requested per page (`pagesize`).
    pub page_size: u32,
    /// Number of pages requested, starting at 1.
    pub page_count: u32,
    /// Delay before the first request, in seconds.
    pub warmup_seconds: f64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.stackexchange.com/2.3/tags".to_string(),
            site: "stackoverflow".to_string(),
            page_size: 100,
            page_count: 25,
            warmup_seconds: 10.0,
        }
    }
}

/// Identifies one page request of one fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub run: u64,
    pub page: u32,
}

impl FetchTicket {
    /// Encodes the ticket into a Zellij request context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_RUN.to_string(), self.run.to_string()),
            (CONTEXT_PAGE.to_string(), self.page.to_string()),
        ])
    }

    /// Recovers a ticket from a context map returned with a web response.
    ///
    /// Returns `None` for responses that were not issued by a fetch run.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtable::fetch::FetchTicket;
    ///
    /// let ticket = FetchTicket { run: 7, page: 3 };
    /// assert_eq!(FetchTicket::from_context(&ticket.to_context()), Some(ticket));
    /// assert_eq!(FetchTicket::from_context(&Default::default()), None);
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let run = context.get(CONTEXT_RUN)?.parse().ok()?;
        let page = context.get(CONTEXT_PAGE)?.parse().ok()?;
        Some(Self { run, page })
    }
}

/// A fully built GET request for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: FetchTicket,
    pub url: String,
}

/// Builds page URLs from a validated endpoint.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base: Url,
    site: String,
    page_size: u32,
}

impl RequestBuilder {
    /// Validates the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `settings.endpoint` is not an absolute URL.
    pub fn new(settings: &FetchSettings) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(&settings.endpoint)?,
            site: settings.site.clone(),
            page_size: settings.page_size,
        })
    }

    /// Builds the request for `page` of run `run`.
    ///
    /// Query: `page=<p>&pagesize=<n>&order=desc&sort=popular&site=<site>`, appended
    /// after any query the endpoint already carries.
    #[must_use]
    pub fn page(&self, run: u64, page: u32) -> PageRequest {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pagesize", &self.page_size.to_string())
            .append_pair("order", "desc")
            .append_pair("sort", "popular")
            .append_pair("site", &self.site);

        PageRequest {
            ticket: FetchTicket { run, page },
            url: url.into(),
        }
    }
}
