mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use reqwest::blocking::Request;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::BongoError;

/// Issues a single GET to `url` with `params` appended to its query string and
/// returns the decoded JSON body.
///
/// Anything other than `200 OK`, or a transport failure, is reported as
/// [`BongoError::Unavailable`]. There are no retries.
#[tracing::instrument(skip(client, params), fields(url = %url))]
pub fn fetch_json<C: HttpClient>(
    client: &C,
    mut url: Url,
    params: &[(&str, &str)],
) -> Result<Value, BongoError> {
    if !params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
    }

    let req = Request::new(Method::GET, url);
    let resp = client.execute(req).map_err(unavailable)?;

    let status = resp.status();
    if status != StatusCode::OK {
        warn!(%status, "API answered with a non-200 status");
        return Err(BongoError::Unavailable {
            reason: format!("API returned status {status}"),
        });
    }

    let body = resp.text().map_err(unavailable)?;
    debug!(bytes = body.len(), "Response body received");

    serde_json::from_str(&body).map_err(|source| BongoError::MalformedResponse {
        what: "JSON",
        source,
    })
}

// The full URL carries the API key, so it is dropped from the message.
fn unavailable(err: reqwest::Error) -> BongoError {
    let err = err.without_url();
    warn!(error = %err, "API request failed");
    BongoError::Unavailable {
        reason: err.to_string(),
    }
}
