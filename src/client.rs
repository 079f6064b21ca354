use crate::api::networks::NetworkConfig;
use crate::api::transport::{HttpTransport, Transport};
use crate::api::types::*;
use crate::config::ClientOptions;
use crate::helpers::amount::Amount;
use crate::transaction::Transaction;
use crate::{Error, Result};
use derive_new::new;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::*;

/// Upper bound (exclusive) of the starting request id.
const REQUEST_ID_RANGE: u128 = 100_000_000;

/// The latest transaction received by an address, see [`SolanaClient::last_transaction_by_receiver`].
#[derive(Debug, Clone, PartialEq, new)]
pub struct ReceivedTransaction {
    pub signature: String,
    pub amount: Amount,
}

/// JSON-RPC client for a Solana cluster.
///
/// Only the methods listed in [`RpcMethod`] can be called. Every request carries its own id and the reply is
/// rejected unless it echoes that id.
#[derive(Debug)]
pub struct SolanaClient<T = HttpTransport> {
    network: NetworkConfig,
    transport: T,
    request_id: AtomicU64,
}

impl SolanaClient<HttpTransport> {
    /// Resolves the network from `options` and builds the HTTPS transport for it.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let network = NetworkConfig::resolve(options.testnet, options.custom_rpc.as_deref());
        let transport = HttpTransport::new(network.host.clone(), &options)?;

        debug!(cluster = network.cluster, host = %network.host, "solana client");

        Ok(Self::with_transport(network, transport))
    }
}

impl<T: Transport> SolanaClient<T> {
    pub fn with_transport(network: NetworkConfig, transport: T) -> Self {
        Self {
            network,
            transport,
            request_id: new_request_id(),
        }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Calls `method` by name.
    ///
    /// # Arguments
    ///
    /// * `method` - JSON-RPC method, e.g. `"getBalance"`
    /// * `params` - positional JSON-RPC params
    ///
    /// # Returns
    ///
    /// The `result` of the reply, `None` when the node answered without one.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidMethodName`] if `method` is not alphanumeric.
    /// * [`Error::UnallowedMethod`] if `method` is not in [`RpcMethod`].
    ///
    /// Both are raised before anything is sent. See [`SolanaClient::request`] for the rest.
    pub async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Option<Value>> {
        let method: RpcMethod = method.parse()?;
        self.request(method, params).await
    }

    /// Sends `method` with `params` and decodes the `result` of the reply into `R`.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] / [`Error::HttpStatus`] if the exchange fails.
    /// * [`Error::Deserialization`] if the reply is not a JSON-RPC envelope or its `result` is not an `R`.
    /// * [`Error::CorrelationMismatch`] if the reply id differs from the request id.
    /// * [`Error::MethodNotFound`] if the node does not know `method`.
    /// * [`Error::Rpc`] for any other error reported by the node.
    pub async fn request<R>(&self, method: RpcMethod, params: Vec<Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let body = build_envelope(id, method, params)?;

        debug!(%method, id, "rpc request");
        trace!(request = %body);

        let text = self.transport.post_json(body).await?;

        let response = serde_json::from_str::<JsonRpcResponse>(&text)
            .map_err(|source| Error::Deserialization { source, text })?;

        match validate_response(id, method, response)? {
            None => Ok(None),
            Some(result) => R::deserialize(&result)
                .map(Some)
                .map_err(|source| Error::Deserialization {
                    source,
                    text: result.to_string(),
                }),
        }
    }

    /// A verifier for the transaction with the given signature, fetching through this client.
    pub fn transaction(&self, signature: impl Into<String>) -> Transaction<'_, T> {
        Transaction::new(signature.into(), self)
    }

    /// Looks up the most recent transaction involving `receiver` and derives the amount it moved.
    ///
    /// # Errors
    ///
    /// * [`Error::RecordNotFound`] if `receiver` has no transactions, or the latest one cannot be fetched.
    /// * Any error of [`Transaction::transaction_amount`].
    #[instrument(skip(self))]
    pub async fn last_transaction_by_receiver(&self, receiver: &str) -> Result<ReceivedTransaction> {
        let signatures: Vec<SignatureInfo> = self
            .request(
                RpcMethod::GetSignaturesForAddress,
                vec![json!(receiver), json!({ "limit": 1 })],
            )
            .await?
            .unwrap_or_default();

        let latest = signatures
            .into_iter()
            .next()
            .ok_or_else(|| Error::RecordNotFound(receiver.to_string()))?;

        let mut transaction = self.transaction(latest.signature);
        let amount = transaction.transaction_amount().await?;

        Ok(ReceivedTransaction::new(
            transaction.signature().to_string(),
            amount,
        ))
    }
}

/// Serializes the JSON-RPC 2.0 request for `method`. No I/O.
pub fn build_envelope(id: u64, method: RpcMethod, params: Vec<Value>) -> Result<String> {
    Ok(serde_json::to_string(&JsonRpcRequest::new(id, method, params))?)
}

fn validate_response(id: u64, method: RpcMethod, response: JsonRpcResponse) -> Result<Option<Value>> {
    if response.id != Some(json!(id)) {
        return Err(Error::CorrelationMismatch {
            expected: id,
            received: response.id,
        });
    }

    if let Some(error) = response.error {
        return Err(match ErrorCode::from_code(error.code) {
            Some(ErrorCode::MethodNotFound) => Error::MethodNotFound(method.to_string()),
            _ => Error::Rpc {
                code: error.code,
                message: error.message,
            },
        });
    }

    Ok(response.result)
}

// Pseudo-random starting point so that ids from different client instances are unlikely to collide.
// It doesn't need to be cryptographically secure.
fn new_request_id() -> AtomicU64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    AtomicU64::new((nanos % REQUEST_ID_RANGE) as u64)
}
