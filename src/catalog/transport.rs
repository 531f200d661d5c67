use ureq::{Agent, AgentBuilder};

use super::error::{CatalogError, CatalogResult};

/// Status and body of a finished HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single seam between the client and the network. Implementations must
/// return non-2xx answers as responses and reserve `Err` for requests that
/// never completed.
pub trait Transport: Send {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> CatalogResult<HttpResponse>;
}

/// Blocking HTTP transport backed by a shared `ureq` agent. No timeout and no
/// retries: a hung request blocks its caller until the OS gives up.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(user_agent: &str) -> Self {
        let agent = AgentBuilder::new().user_agent(user_agent).build();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> CatalogResult<HttpResponse> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.call() {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|err| CatalogError::Network(err.to_string()))?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(CatalogError::Network(transport.to_string()))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// In-memory transport answering from a fixed URL table. Unknown URLs get
    /// a 404. Every request is recorded with its headers.
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        routes: Arc<Mutex<HashMap<String, CatalogResult<HttpResponse>>>>,
        pub(crate) requests: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
    }

    impl FakeTransport {
        pub(crate) fn respond(&self, url: &str, status: u16, body: &str) -> &Self {
            self.routes.lock().unwrap().insert(
                url.to_string(),
                Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
            );
            self
        }

        pub(crate) fn fail(&self, url: &str, err: CatalogError) -> &Self {
            self.routes.lock().unwrap().insert(url.to_string(), Err(err));
            self
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str, headers: &[(&str, &str)]) -> CatalogResult<HttpResponse> {
            self.requests.lock().unwrap().push((
                url.to_string(),
                headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            self.routes
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or(Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                }))
        }
    }
}
