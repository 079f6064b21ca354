//! Prints the latest transaction received by an address and the amount it moved.
//!
//! ```sh
//! $ SOLANA_TESTNET=true cargo run --example last_received -- <address>
//! ```

use eyre::{eyre, Result};
use solana_tx_verifier::prelude::*;
use tracing::*;

mod common;
use common::{init_tracing, Config};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let address = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("missing receiver address"))?;

    let client = Config::load()?.client()?;
    let received = client.last_transaction_by_receiver(&address).await?;

    info!(
        signature = %received.signature,
        amount = %received.amount,
        url = %client.network().explorer_tx_url(&received.signature),
    );

    Ok(())
}
