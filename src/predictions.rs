//! Arrival predictions for a stop, and tag filtering.

use serde::Serialize;
use tracing::debug;

use crate::error::BongoError;
use crate::fetch::HttpClient;
use crate::models::PredictionResponse;
use crate::services::BongoClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub minutes: i64,
    pub route_name: String,
    pub agency_name: String,
    pub route_tag: String,
    pub agency_tag: String,
}

impl Prediction {
    /// `true` if `token` equals either the route tag or the agency tag.
    pub fn matches(&self, token: &str) -> bool {
        self.route_tag == token || self.agency_tag == token
    }
}

pub fn predictions_from_response(response: PredictionResponse) -> Vec<Prediction> {
    response
        .predictions
        .into_iter()
        .map(|p| Prediction {
            minutes: p.minutes,
            route_name: p.title,
            agency_name: p.agency_name,
            route_tag: p.tag,
            agency_tag: p.agency,
        })
        .collect()
}

/// Fetches predictions for an already normalized `stop_id`, in API order.
pub fn get_predictions<C: HttpClient>(
    api: &BongoClient<C>,
    stop_id: &str,
) -> Result<Vec<Prediction>, BongoError> {
    let predictions = predictions_from_response(api.predictions(stop_id)?);
    debug!(stop_id, predictions = predictions.len(), "Predictions fetched");
    Ok(predictions)
}

/// Keeps the predictions whose route or agency tag equals `filter`.
///
/// An empty filter returns `predictions` untouched. Never fails.
pub fn filter_predictions(predictions: Vec<Prediction>, filter: &str) -> Vec<Prediction> {
    if filter.is_empty() {
        return predictions;
    }
    predictions.into_iter().filter(|p| p.matches(filter)).collect()
}
