use thiserror::Error;

/// Failures that end a fetch cycle. None of them are retried.
#[derive(Debug, Error)]
pub enum FlightsError {
    #[error("HTTP request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Can't load json response")]
    Decode(#[from] serde_json::Error),

    #[error("Request failed: [{0}]")]
    Api(String),
}
