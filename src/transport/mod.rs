//! Search transport (impure).
//!
//! Maps one [`QuerySpec`] to one HTTP request against a named resource
//! endpoint and parses the typed envelope. Exactly one attempt per call: no
//! retries, no caching. Retry policy, such as it is, belongs to the caller.
//!
//! Failures are classified uniformly into [`TransportError`]: `Network` for
//! connection-level failures, `HttpStatus` for non-2xx answers, `Decode` for
//! bodies that do not match the envelope shape or violate its invariants.

use std::time::Duration;

use tracing::debug;

use crate::model::{Resource, TransportError};
use crate::query::{QuerySpec, ResultEnvelope};

/// Request timeout. Generous because paginated searches over large scan
/// stores can be slow; stale answers are discarded by the controller anyway.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ===== SearchClient =====

/// HTTP client bound to one API base URL and one module.
///
/// Cheap to clone; clones share the underlying connection pool, which is what
/// lets superseded requests keep draining in spawned tasks.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    module: String,
}

impl SearchClient {
    /// Build a client against `base_url` (trailing slash tolerated) for the
    /// given module (e.g. `nmap`).
    pub fn new(base_url: &str, module: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(SearchClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            module: module.to_string(),
        })
    }

    /// Endpoint URL for resource `R`.
    fn endpoint<R: Resource>(&self) -> String {
        format!(
            "{}/modules/{}/search/{}",
            self.base_url,
            self.module,
            R::NAME
        )
    }

    /// Perform one search request and parse the typed envelope.
    ///
    /// Non-2xx answers become [`TransportError::HttpStatus`]; bodies that do
    /// not decode, or that claim fewer totals than returned records, or that
    /// exceed the requested page size, become [`TransportError::Decode`].
    pub async fn search<R: Resource>(
        &self,
        spec: &QuerySpec,
    ) -> Result<ResultEnvelope<R>, TransportError> {
        let url = self.endpoint::<R>();
        debug!(url = %url, page = spec.page(), "issuing search request");

        // Authorization header will be added here once the auth system
        // exists; Content-Type is set by the JSON body.
        let response = self.http.post(&url).json(spec).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_envelope(&body, spec.per_page())
    }
}

// ===== Envelope decoding =====

/// Parse a response body into a typed envelope and enforce its invariants.
///
/// Separate from the request path so the classification rules are testable
/// without a live server.
pub fn decode_envelope<R: Resource>(
    body: &str,
    per_page: u32,
) -> Result<ResultEnvelope<R>, TransportError> {
    let envelope: ResultEnvelope<R> =
        serde_json::from_str(body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })?;

    let returned = envelope.results.len();
    if returned > per_page as usize {
        return Err(TransportError::Decode {
            message: format!("server returned {returned} records for per_page {per_page}"),
        });
    }
    if envelope.total < returned as u64 {
        return Err(TransportError::Decode {
            message: format!(
                "total {} is smaller than the {returned} returned records",
                envelope.total
            ),
        });
    }

    Ok(envelope)
}
