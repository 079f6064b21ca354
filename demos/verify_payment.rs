//! Checks that a transaction paid the expected amount.
//!
//! ```sh
//! $ cargo run --example verify_payment -- <signature> <amount> [token mint]
//! ```

use eyre::{eyre, Result};
use solana_tx_verifier::prelude::*;
use tracing::*;

mod common;
use common::{init_tracing, Config};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let signature = args.next().ok_or_else(|| eyre!("missing transaction signature"))?;
    let amount: f64 = args.next().ok_or_else(|| eyre!("missing amount"))?.parse()?;
    let expectation = match args.next() {
        Some(mint) => TransferExpectation::token(amount, mint),
        None => TransferExpectation::new(amount),
    };

    let client = Config::load()?.client()?;
    let mut tx = client.transaction(signature);

    if !tx.validate().await? {
        warn!(url = %tx.explorer_url(), "transaction not found or failed");
        return Ok(());
    }

    let verified = tx.verify_transfer_with_data(&expectation).await?;
    info!(%tx, verified, url = %tx.explorer_url(), ?expectation);

    Ok(())
}
