use crate::error::FlightsError;
use crate::events::{Event, EventSink};

/// Anything that can turn a URL into a response body.
pub trait Fetch {
    fn get(&self, url: &str, sink: &dyn EventSink) -> Result<Vec<u8>, FlightsError>;
}

/// Blocking HTTP fetcher. One GET per call, no retries, transport defaults.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        // Error payloads come with 4xx/5xx codes; the body is still decoded.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str, sink: &dyn EventSink) -> Result<Vec<u8>, FlightsError> {
        sink.send(Event::FetchStarted { url: url.to_string() });

        let transport = |source| FlightsError::Transport {
            url: url.to_string(),
            source,
        };
        let mut resp = self.agent.get(url).call().map_err(transport)?;
        // No cap on the body size; a busy day can exceed ureq's 10 MiB default.
        let body = resp
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(transport)?;

        sink.send(Event::FetchComplete { bytes: body.len() });
        Ok(body)
    }
}
