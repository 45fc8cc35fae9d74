//! Executes core `HttpRequest`s over the network with ureq.

use quiz_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    /// Status codes are returned as data so the core decides what counts as
    /// failure. No timeout is configured.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, path = %req.path, "sending request");

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
