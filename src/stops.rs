//! Stop listing for a single route.

use serde::Serialize;
use tracing::debug;

use crate::error::BongoError;
use crate::fetch::HttpClient;
use crate::models::RouteResponse;
use crate::services::BongoClient;
use crate::tags::RouteInfo;

pub const STOP_ID_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

/// Left-pads a stop number with `'0'` to four characters.
///
/// Inputs already longer than four characters are returned unchanged.
pub fn normalize_stop_id(raw: &str) -> String {
    format!("{raw:0>width$}", width = STOP_ID_WIDTH)
}

/// Stops of the route's first direction, in the order the API lists them.
pub fn stops_from_response(response: RouteResponse) -> Result<Vec<Stop>, BongoError> {
    let direction = response
        .route
        .directions
        .into_iter()
        .next()
        .ok_or_else(|| BongoError::malformed("route", "route has no directions"))?;

    Ok(direction
        .stops
        .into_iter()
        .map(|stop| Stop {
            id: normalize_stop_id(&stop.stop_number),
            name: stop.stop_title,
        })
        .collect())
}

/// Fetches the stop sequence for `route`.
///
/// Only the first direction is read; routes with several directions expose
/// just that one.
pub fn get_stops<C: HttpClient>(
    api: &BongoClient<C>,
    route: &RouteInfo,
) -> Result<Vec<Stop>, BongoError> {
    let stops = stops_from_response(api.route(&route.agency_tag, &route.tag)?)?;
    debug!(route = %route.tag, stops = stops.len(), "Stops fetched");
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_pads_to_four() {
        assert_eq!(normalize_stop_id("2"), "0002");
        assert_eq!(normalize_stop_id("45"), "0045");
        assert_eq!(normalize_stop_id("1234"), "1234");
    }

    #[test]
    fn test_normalize_keeps_longer_ids() {
        assert_eq!(normalize_stop_id("12345"), "12345");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_stop_id(""), "0000");
    }

    #[test]
    fn test_first_direction_only() {
        let response: RouteResponse = serde_json::from_value(json!({
            "route": {
                "directions": [
                    { "stops": [
                        { "stopnumber": 1, "stoptitle": "Downtown Interchange" },
                        { "stopnumber": "83", "stoptitle": "Muscatine & 1st Ave" }
                    ] },
                    { "stops": [
                        { "stopnumber": 9999, "stoptitle": "Other Way" }
                    ] }
                ]
            }
        }))
        .unwrap();

        let stops = stops_from_response(response).unwrap();
        assert_eq!(
            stops,
            vec![
                Stop { id: "0001".to_string(), name: "Downtown Interchange".to_string() },
                Stop { id: "0083".to_string(), name: "Muscatine & 1st Ave".to_string() },
            ]
        );
    }

    #[test]
    fn test_no_directions_is_malformed() {
        let response: RouteResponse =
            serde_json::from_value(json!({ "route": { "directions": [] } })).unwrap();

        let err = stops_from_response(response).unwrap_err();
        assert!(matches!(err, BongoError::MalformedResponse { what: "route", .. }));
    }
}
