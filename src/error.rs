use thiserror::Error;

#[derive(Error, Debug)]
pub enum BongoError {
    #[error("Problem related with the API, try again later ({reason})")]
    Unavailable { reason: String },

    #[error("Malformed {what} response: {source}")]
    MalformedResponse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown route tag {0:?}")]
    UnknownRoute(String),
}

impl BongoError {
    /// Builds a [`BongoError::MalformedResponse`] for a shape problem serde
    /// cannot see on its own (e.g. an empty list that must not be empty).
    pub fn malformed(what: &'static str, msg: &str) -> Self {
        BongoError::MalformedResponse {
            what,
            source: <serde_json::Error as serde::de::Error>::custom(msg),
        }
    }
}
