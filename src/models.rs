//! Wire schema for the BONGO JSON API.
//!
//! Only the fields the client consumes are declared; everything else in the
//! payloads is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `GET /routelist`
#[derive(Debug, Deserialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RouteListEntry {
    pub route: RouteSummary,
}

#[derive(Debug, Deserialize)]
pub struct RouteSummary {
    pub name: String,
    pub tag: String,
    pub agency: String,
    #[serde(rename = "agencyname")]
    pub agency_name: String,
}

/// `GET /route?agency=..&route=..`
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    pub route: RouteDetail,
}

#[derive(Debug, Deserialize)]
pub struct RouteDetail {
    pub directions: Vec<Direction>,
}

#[derive(Debug, Deserialize)]
pub struct Direction {
    pub stops: Vec<StopEntry>,
}

#[derive(Debug, Deserialize)]
pub struct StopEntry {
    #[serde(rename = "stopnumber", deserialize_with = "string_or_number")]
    pub stop_number: String,
    #[serde(rename = "stoptitle")]
    pub stop_title: String,
}

/// `GET /prediction?stopid=..`
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<PredictionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionEntry {
    pub title: String,
    #[serde(rename = "agencyName")]
    pub agency_name: String,
    #[serde(deserialize_with = "integer_or_numeric_string")]
    pub minutes: i64,
    pub tag: String,
    pub agency: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInt {
    Int(i64),
    Str(String),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(n) => n.to_string(),
        StringOrInt::Str(s) => s,
    })
}

fn integer_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(whole), _) => Ok(whole),
            // Fractional minutes truncate toward zero.
            (None, Some(f)) if f.is_finite() => Ok(f.trunc() as i64),
            _ => Err(D::Error::custom(format!("minutes is out of range: {n}"))),
        },
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("minutes is not an integer: {s:?}"))),
        other => Err(D::Error::custom(format!("minutes is not numeric: {other}"))),
    }
}
