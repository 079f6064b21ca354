pub use crate::api::networks::{Network, NetworkConfig};
pub use crate::api::types::{RpcMethod, TransactionRecord};
pub use crate::client::SolanaClient;
pub use crate::config::{ClientOptions, TlsVerification};
pub use crate::helpers::amount::Amount;
pub use crate::transaction::{Transaction, TransferExpectation};
