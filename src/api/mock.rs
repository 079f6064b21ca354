use crate::api::networks::{Network, NetworkConfig};
use crate::api::transport::Transport;
use crate::api::types::JsonRpcRequest;
use crate::client::SolanaClient;
use crate::Result;
use serde_json::{json, Value};
use std::cell::RefCell;

type Handler = Box<dyn Fn(&JsonRpcRequest) -> Reply>;

pub(crate) enum Reply {
    Json(Value),
    Raw(String),
}

/// A [`Transport`] answering from a closure and recording every request it receives.
pub(crate) struct MockTransport {
    handler: Handler,
    requests: RefCell<Vec<JsonRpcRequest>>,
}

impl MockTransport {
    /// Replies with whatever envelope `handler` builds for the request.
    pub fn new(handler: impl Fn(&JsonRpcRequest) -> Value + 'static) -> Self {
        Self::with_handler(Box::new(move |request: &JsonRpcRequest| Reply::Json(handler(request))))
    }

    /// Replies `result` to every call, echoing the request id.
    pub fn replying(result: Value) -> Self {
        Self::new(move |request| json!({ "jsonrpc": "2.0", "id": request.id, "result": result }))
    }

    /// Replies with a body that is not necessarily JSON.
    pub fn raw(body: &'static str) -> Self {
        Self::with_handler(Box::new(move |_: &JsonRpcRequest| Reply::Raw(body.to_string())))
    }

    fn with_handler(handler: Handler) -> Self {
        Self {
            handler,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<JsonRpcRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn post_json(&self, body: String) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(&body)?;
        let reply = (self.handler)(&request);
        self.requests.borrow_mut().push(request);

        Ok(match reply {
            Reply::Json(value) => value.to_string(),
            Reply::Raw(text) => text,
        })
    }
}

pub(crate) fn mock_client(transport: MockTransport) -> SolanaClient<MockTransport> {
    SolanaClient::with_transport(NetworkConfig::from(Network::Devnet), transport)
}
