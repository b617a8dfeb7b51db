use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::BongoError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::models::{PredictionResponse, RouteListResponse, RouteResponse};

/// Client for the three BONGO endpoints: `routelist`, `route` and `prediction`.
///
/// Every call is one blocking request; the response body is decoded into the
/// schema structs in [`crate::models`].
pub struct BongoClient<C> {
    http: C,
    base_url: Url,
}

impl BongoClient<UrlParam<BasicClient>> {
    /// Builds a client that sends `api_key=<key>` on every request.
    pub fn from_config(config: &Config) -> Self {
        let http = UrlParam::api_key(BasicClient::new(), config.api_key.clone());
        Self::new(http, config.base_url.clone())
    }
}

impl<C: HttpClient> BongoClient<C> {
    pub fn new(http: C, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn route_list(&self) -> Result<RouteListResponse, BongoError> {
        let value = fetch_json(&self.http, self.endpoint("routelist"), &[])?;
        decode(value, "route list")
    }

    pub fn route(&self, agency: &str, route: &str) -> Result<RouteResponse, BongoError> {
        let value = fetch_json(
            &self.http,
            self.endpoint("route"),
            &[("agency", agency), ("route", route)],
        )?;
        decode(value, "route")
    }

    pub fn predictions(&self, stop_id: &str) -> Result<PredictionResponse, BongoError> {
        let value = fetch_json(&self.http, self.endpoint("prediction"), &[("stopid", stop_id)])?;
        decode(value, "prediction")
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        // Config guarantees a hierarchical base, so this never fails.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &'static str) -> Result<T, BongoError> {
    serde_json::from_value(value).map_err(|source| BongoError::MalformedResponse { what, source })
}
