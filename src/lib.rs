mod api;
mod client;
mod config;
mod error;
mod helpers;
pub mod prelude;
mod transaction;

pub use api::networks::{Network, NetworkConfig, MAINNET_CLUSTER};
pub use api::transport::{HttpTransport, Transport};
pub use api::types::*;
pub use client::{build_envelope, ReceivedTransaction, SolanaClient};
pub use config::{ClientOptions, TlsVerification};
pub use error::{Error, Result};
pub use helpers::amount::{Amount, SOL_DECIMALS};
pub use transaction::{Transaction, TransferExpectation};
