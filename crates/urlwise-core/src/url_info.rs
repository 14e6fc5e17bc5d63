//! URL metadata lookups and the handler that ties the crate together.
//!
//! Fetching reachability, size and modification time is the job of an
//! external [`UrlInfoSource`]; [`UrlHandler`] owns one together with the
//! [`HandlerConfig`] (including the preferred request method) and forwards
//! to it.

use std::time::Duration;
use url::Url;

use crate::config::{HandlerConfig, RequestMethod};
use crate::put_status::{self, PutError};
use crate::response::ResponseView;
use crate::url_model::{self, UrlError};

/// What a URL-info lookup learned about a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlInfo {
    pub reachable: bool,
    /// Size in bytes, `-1` when unknown.
    pub content_length: i64,
    /// Milliseconds since the Unix epoch, `0` when unknown.
    pub last_modified: i64,
}

impl UrlInfo {
    /// Result for a resource that could not be reached.
    pub const UNAVAILABLE: UrlInfo = UrlInfo {
        reachable: false,
        content_length: -1,
        last_modified: 0,
    };

    pub fn available(content_length: i64, last_modified: i64) -> Self {
        UrlInfo {
            reachable: true,
            content_length,
            last_modified,
        }
    }
}

/// Performs the actual metadata request. Implemented by the transport layer.
pub trait UrlInfoSource {
    /// Fetch info for `url` with the given method; `None` timeout means the
    /// source's own default.
    fn fetch_info(&self, url: &Url, timeout: Option<Duration>, method: RequestMethod) -> UrlInfo;
}

/// URL handler: a metadata source plus the configuration it runs with.
#[derive(Debug, Clone)]
pub struct UrlHandler<S> {
    source: S,
    config: HandlerConfig,
}

impl<S: UrlInfoSource> UrlHandler<S> {
    pub fn new(source: S, config: HandlerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn request_method(&self) -> RequestMethod {
        self.config.request_method
    }

    pub fn set_request_method(&mut self, method: RequestMethod) {
        self.config.request_method = method;
    }

    /// Fetch info using the configured default timeout.
    pub fn url_info(&self, url: &Url) -> UrlInfo {
        self.fetch(url, self.config.default_timeout())
    }

    pub fn url_info_within(&self, url: &Url, timeout: Duration) -> UrlInfo {
        self.fetch(url, Some(timeout))
    }

    pub fn is_reachable(&self, url: &Url) -> bool {
        self.url_info(url).reachable
    }

    pub fn is_reachable_within(&self, url: &Url, timeout: Duration) -> bool {
        self.url_info_within(url, timeout).reachable
    }

    pub fn content_length(&self, url: &Url) -> i64 {
        self.url_info(url).content_length
    }

    pub fn content_length_within(&self, url: &Url, timeout: Duration) -> i64 {
        self.url_info_within(url, timeout).content_length
    }

    pub fn last_modified(&self, url: &Url) -> i64 {
        self.url_info(url).last_modified
    }

    pub fn last_modified_within(&self, url: &Url, timeout: Duration) -> i64 {
        self.url_info_within(url, timeout).last_modified
    }

    pub fn normalize_to_string(&self, url: &Url) -> Result<String, UrlError> {
        url_model::normalize_to_string(url.as_str())
    }

    pub fn normalize_to_url(&self, url: &Url) -> Result<Url, UrlError> {
        url_model::normalize_to_url(url)
    }

    /// Validate a PUT response, quoting at most `error_body_limit` bytes of its error body.
    pub fn validate_put_response<V>(&self, dest: &Url, response: &mut V) -> Result<(), PutError>
    where
        V: ResponseView + ?Sized,
    {
        put_status::validate_put_response_with_limit(dest, response, self.config.error_body_limit)
    }

    fn fetch(&self, url: &Url, timeout: Option<Duration>) -> UrlInfo {
        let method = self.config.request_method;
        tracing::debug!(url = %url, ?timeout, ?method, "fetching URL info");
        self.source.fetch_info(url, timeout, method)
    }
}
