//! HTTP transport used by the dictionary and corpus services.
//!
//! The services only need "POST this JSON, give me status and body". The
//! default implementation is a blocking `ureq` agent.
use hashbrown::HashMap;
use serde_json::Value;

use crate::error::{CorpusError, Result};

/// Raw answer of the service, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// response body as text
    pub body: String,
}

impl HttpResponse {
    /// Response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> HttpResponse {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body, failing with [`CorpusError::Api`] on a non-200 status
    /// or when the body is an error object.
    pub fn json(&self) -> Result<Value> {
        if self.status != 200 {
            return Err(CorpusError::api(Some(self.status), self.body.clone()));
        }
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&self.body)?;
        reject_error_object(&value)?;
        Ok(value)
    }
}

/// Error bodies look like `{"status": 500, "error": "...", "message": "..."}`.
fn reject_error_object(value: &Value) -> Result<()> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    let status = obj
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok());
    let failed_status = status.map(|s| s >= 400).unwrap_or(false);

    if !obj.contains_key("error") && !failed_status {
        return Ok(());
    }

    let detail = ["message", "error", "detail"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string());

    Err(CorpusError::api(status, detail))
}

/// Sends requests to the service. Implement it to swap the HTTP stack or to
/// answer from fixtures.
pub trait Transport {
    /// Sends `payload` as a JSON POST to `url`.
    ///
    /// Status codes are not errors at this level: any response that arrived is
    /// returned as `Ok`. `Err` is reserved for failures to get a response at all.
    fn post_json(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        payload: &Value,
    ) -> Result<HttpResponse>;
}

/// Blocking transport on top of a shared `ureq::Agent`.
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Transport with a default agent.
    pub fn new() -> UreqTransport {
        UreqTransport {
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Transport on a preconfigured agent (timeouts, proxy, TLS).
    pub fn with_agent(agent: ureq::Agent) -> UreqTransport {
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        payload: &Value,
    ) -> Result<HttpResponse> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.send_json(payload) {
            Ok(resp) => {
                let status = resp.status();
                let body = resp
                    .into_string()
                    .map_err(|e| CorpusError::Transport(Box::new(e)))?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(t)) => Err(CorpusError::Transport(Box::new(t))),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// A request as seen by [`MockTransport`].
    #[derive(Clone, Debug)]
    pub struct Recorded {
        pub url: String,
        pub payload: Value,
    }

    enum Reply {
        Response(HttpResponse),
        Refused,
    }

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl MockTransport {
        pub fn new() -> MockTransport {
            MockTransport::default()
        }

        pub fn reply(self, status: u16, body: Value) -> Self {
            self.replies
                .lock()
                .push_back(Reply::Response(HttpResponse::new(status, body.to_string())));
            self
        }

        pub fn reply_raw(self, status: u16, body: &str) -> Self {
            self.replies
                .lock()
                .push_back(Reply::Response(HttpResponse::new(status, body)));
            self
        }

        pub fn refuse(self) -> Self {
            self.replies.lock().push_back(Reply::Refused);
            self
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().len()
        }
    }

    impl Transport for MockTransport {
        fn post_json(
            &self,
            url: &str,
            _headers: &HashMap<String, String>,
            payload: &Value,
        ) -> Result<HttpResponse> {
            self.requests.lock().push(Recorded {
                url: url.to_string(),
                payload: payload.clone(),
            });

            match self.replies.lock().pop_front() {
                Some(Reply::Response(r)) => Ok(r),
                Some(Reply::Refused) => Err(CorpusError::Transport(Box::new(
                    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
                ))),
                None => panic!("MockTransport: no reply queued for {}", url),
            }
        }
    }
}
