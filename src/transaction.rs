use crate::api::transport::{HttpTransport, Transport};
use crate::api::types::{RpcMethod, TransactionRecord};
use crate::client::SolanaClient;
use crate::helpers::amount::{Amount, SOL_DECIMALS};
use crate::{Error, Result};
use derive_new::new;
use serde_json::json;
use std::fmt::Display;
use tracing::*;

/// What a payment is expected to look like. A `token_address` selects the SPL token comparison.
#[derive(Debug, Clone, PartialEq, new)]
pub struct TransferExpectation {
    pub amount: f64,
    #[new(default)]
    pub token_address: Option<String>,
}

impl TransferExpectation {
    pub fn token(amount: f64, token_address: impl Into<String>) -> Self {
        Self {
            amount,
            token_address: Some(token_address.into()),
        }
    }
}

/// A transaction looked up by signature, verified against an expected transfer.
///
/// Every check fetches the record again; the latest one is kept and available through [`Transaction::data`].
///
/// See [`crate::SolanaClient::transaction`].
#[derive(new)]
pub struct Transaction<'lt, T = HttpTransport> {
    /// Transaction signature (base-58).
    signature: String,

    /// Client the record is fetched with.
    client: &'lt SolanaClient<T>,

    #[new(default)]
    data: Option<TransactionRecord>,
}

impl<T> Display for Transaction<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.signature)
    }
}

impl<T: Transport> Transaction<'_, T> {
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The record from the last fetch. `None` before the first fetch, or if the node did not know the signature.
    pub fn data(&self) -> Option<&TransactionRecord> {
        self.data.as_ref()
    }

    /// Explorer link for this transaction on the client's cluster.
    pub fn explorer_url(&self) -> String {
        self.client.network().explorer_tx_url(&self.signature)
    }

    /// Fetches the record with `getTransaction`, replacing the previous one.
    ///
    /// # Errors
    ///
    /// * Any [`SolanaClient::request`] error.
    /// * [`Error::Deserialization`] if the record lacks `meta` or its balance arrays.
    #[instrument(skip(self), fields(signature = %self.signature))]
    pub async fn fetch_data(&mut self) -> Result<Option<&TransactionRecord>> {
        self.data = self
            .client
            .request(
                RpcMethod::GetTransaction,
                vec![
                    json!(self.signature),
                    json!({ "encoding": "json", "maxSupportedTransactionVersion": 0 }),
                ],
            )
            .await?;

        debug!(found = self.data.is_some());

        Ok(self.data.as_ref())
    }

    /// Fetches the record and tells whether the transaction landed and succeeded.
    ///
    /// # Returns
    ///
    /// `false` if the signature is unknown or `meta.err` is set.
    pub async fn validate(&mut self) -> Result<bool> {
        let valid = match self.fetch_data().await? {
            None => false,
            Some(record) => record.meta.err.is_none(),
        };

        Ok(valid)
    }

    /// Fetches the record and derives the amount it moved. See [`crate::TransactionMeta::transfer_amount`].
    ///
    /// # Errors
    ///
    /// * [`Error::RecordNotFound`] if the signature is unknown.
    pub async fn transaction_amount(&mut self) -> Result<Amount> {
        self.fetch_data().await?;
        self.record()?.meta.transfer_amount()
    }

    /// Whether this transaction succeeded and moved `amount` SOL, compared at lamport precision.
    pub async fn verify_coin_transfer_with_data(&mut self, amount: f64) -> Result<bool> {
        let expected = Amount::from_ui(amount, SOL_DECIMALS)?;

        if !self.validate().await? {
            return Ok(false);
        }

        let diff = self.record()?.meta.native_transfer_amount()?;
        debug!(%diff, %expected, "coin transfer");

        Ok(diff.eq_at(&expected, SOL_DECIMALS))
    }

    /// Whether this transaction succeeded and moved `amount` tokens. `amount` is rounded to the token's
    /// decimals before comparing.
    pub async fn verify_token_transfer_with_data(&mut self, amount: f64) -> Result<bool> {
        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount));
        }

        if !self.validate().await? {
            return Ok(false);
        }

        self.token_transfer_matches(amount, None)
    }

    /// Dispatches to the token check when `expectation` names a token, to the coin check otherwise.
    ///
    /// For tokens, a record whose balances name a different mint does not match.
    pub async fn verify_transfer_with_data(&mut self, expectation: &TransferExpectation) -> Result<bool> {
        match expectation.token_address.as_deref() {
            Some(mint) => {
                if !expectation.amount.is_finite() {
                    return Err(Error::InvalidAmount(expectation.amount));
                }

                if !self.validate().await? {
                    return Ok(false);
                }

                self.token_transfer_matches(expectation.amount, Some(mint))
            }
            None => self.verify_coin_transfer_with_data(expectation.amount).await,
        }
    }

    fn token_transfer_matches(&self, amount: f64, mint: Option<&str>) -> Result<bool> {
        let meta = &self.record()?.meta;

        if !meta.is_token_transfer() {
            debug!("no token balances");
            return Ok(false);
        }

        if let Some(mint) = mint {
            if !meta.only_moves_mint(mint) {
                debug!(mint, "token balances of another mint");
                return Ok(false);
            }
        }

        let diff = meta.token_transfer_amount()?;
        let expected = Amount::from_ui(amount, diff.decimals())?;
        debug!(%diff, %expected, "token transfer");

        Ok(diff.eq_at(&expected, diff.decimals()))
    }

    fn record(&self) -> Result<&TransactionRecord> {
        self.data
            .as_ref()
            .ok_or_else(|| Error::RecordNotFound(self.signature.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{mock_client, MockTransport};
    use serde_json::Value;

    const SIGNATURE: &str =
        "5j7s6NiJS3JAkvgkoc18WVAsiSaci2pxB2A6ueCJP4tprA2TFg9wSyTLeYouxPBJEMzJinENTkpA52YStRW5Dia7";

    fn native_record(pre: [u64; 2], post: [u64; 2]) -> Value {
        json!({
            "slot": 123456,
            "blockTime": 1678888888,
            "meta": {
                "err": null,
                "fee": 5000,
                "preBalances": pre,
                "postBalances": post,
                "preTokenBalances": [],
                "postTokenBalances": []
            }
        })
    }

    fn token_entry(account_index: u32, ui_amount: f64, decimals: u8) -> Value {
        json!({
            "accountIndex": account_index,
            "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "uiTokenAmount": { "uiAmount": ui_amount, "decimals": decimals }
        })
    }

    fn token_record() -> Value {
        json!({
            "slot": 123456,
            "meta": {
                "err": null,
                "preBalances": [10000000, 0, 1],
                "postBalances": [7955720, 2039280, 1],
                "preTokenBalances": [token_entry(0, 50.0, 6)],
                "postTokenBalances": [token_entry(0, 45.0, 6), token_entry(1, 55.0, 6)]
            }
        })
    }

    #[tokio::test]
    async fn test_coin_transfer() {
        let client = mock_client(MockTransport::replying(native_record(
            [1_000_000_000, 500_000_000],
            [1_100_000_000, 400_000_000],
        )));
        let mut tx = client.transaction(SIGNATURE);

        assert!(tx.verify_coin_transfer_with_data(0.1).await.unwrap());
        assert!(!tx.verify_coin_transfer_with_data(0.2).await.unwrap());
        assert!(tx.verify_coin_transfer_with_data(0.1000000001).await.unwrap());
    }

    #[tokio::test]
    async fn test_coin_transfer_inverted_indices() {
        let client = mock_client(MockTransport::replying(native_record(
            [500_000_000, 1_000_000_000],
            [400_000_000, 1_100_000_000],
        )));
        let mut tx = client.transaction(SIGNATURE);

        assert_eq!(tx.transaction_amount().await.unwrap().to_f64(), 0.1);
        assert!(tx.verify_coin_transfer_with_data(0.1).await.unwrap());
    }

    #[tokio::test]
    async fn test_token_transfer_receiver_account_created() {
        let client = mock_client(MockTransport::replying(token_record()));
        let mut tx = client.transaction(SIGNATURE);

        assert!(tx.verify_token_transfer_with_data(5.0).await.unwrap());
        // more precision than the mint supports
        assert!(tx.verify_token_transfer_with_data(5.0000001).await.unwrap());
        assert!(!tx.verify_token_transfer_with_data(5.1).await.unwrap());
        assert_eq!(tx.transaction_amount().await.unwrap(), Amount::new(5_000_000, 6));
    }

    #[tokio::test]
    async fn test_verify_transfer_dispatch() {
        let client = mock_client(MockTransport::replying(token_record()));
        let mut tx = client.transaction(SIGNATURE);

        let usdc = TransferExpectation::token(5.0, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
        assert!(tx.verify_transfer_with_data(&usdc).await.unwrap());

        let other_mint = TransferExpectation::token(5.0, "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");
        assert!(!tx.verify_transfer_with_data(&other_mint).await.unwrap());

        // coin path over the same record: index 0 paid, index 1 received the rent-exempt deposit
        let coin = TransferExpectation::new(0.00203928);
        assert!(tx.verify_transfer_with_data(&coin).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_token_address_takes_the_token_path() {
        let client = mock_client(MockTransport::replying(native_record(
            [1_000_000_000, 500_000_000],
            [1_100_000_000, 400_000_000],
        )));
        let mut tx = client.transaction(SIGNATURE);

        // the coin check would match 0.1 SOL; the token check finds no token balances
        assert!(tx.verify_transfer_with_data(&TransferExpectation::new(0.1)).await.unwrap());
        assert!(!tx
            .verify_transfer_with_data(&TransferExpectation::token(0.1, ""))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_token_check_on_native_transfer() {
        let client = mock_client(MockTransport::replying(native_record([2, 0], [1, 1])));
        let mut tx = client.transaction(SIGNATURE);

        assert!(!tx.verify_token_transfer_with_data(1.0).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_transaction() {
        let mut record = native_record([1_000_000_000, 500_000_000], [1_100_000_000, 400_000_000]);
        record["meta"]["err"] = json!({ "InstructionError": [0, { "Custom": 1 }] });

        let client = mock_client(MockTransport::replying(record));
        let mut tx = client.transaction(SIGNATURE);

        assert!(!tx.validate().await.unwrap());
        assert!(!tx.verify_coin_transfer_with_data(0.1).await.unwrap());
        assert!(!tx.verify_token_transfer_with_data(0.1).await.unwrap());
        assert!(!tx
            .verify_transfer_with_data(&TransferExpectation::new(0.1))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_signature() {
        let client = mock_client(MockTransport::replying(Value::Null));
        let mut tx = client.transaction(SIGNATURE);

        assert!(!tx.validate().await.unwrap());
        assert!(tx.data().is_none());
        assert!(!tx.verify_coin_transfer_with_data(1.0).await.unwrap());
        assert!(matches!(
            tx.transaction_amount().await,
            Err(Error::RecordNotFound(signature)) if signature == SIGNATURE
        ));
    }

    #[tokio::test]
    async fn test_validate_fetches_every_time() {
        let client = mock_client(MockTransport::replying(native_record([2, 0], [1, 1])));
        let mut tx = client.transaction(SIGNATURE);

        let first = tx.validate().await.unwrap();
        let second = tx.validate().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.transport().calls(), 2);

        let requests = client.transport().requests();
        assert_eq!(requests[0].method, RpcMethod::GetTransaction);
        assert_eq!(requests[0].params[0], json!(SIGNATURE));
        assert_eq!(requests[0].params[1]["maxSupportedTransactionVersion"], json!(0));
    }

    #[tokio::test]
    async fn test_record_without_meta() {
        let client = mock_client(MockTransport::replying(json!({ "slot": 1 })));
        let mut tx = client.transaction(SIGNATURE);

        assert!(matches!(tx.validate().await, Err(Error::Deserialization { .. })));
    }

    #[tokio::test]
    async fn test_invalid_expected_amount_sends_nothing() {
        let client = mock_client(MockTransport::replying(Value::Null));
        let mut tx = client.transaction(SIGNATURE);

        assert!(matches!(
            tx.verify_coin_transfer_with_data(f64::NAN).await,
            Err(Error::InvalidAmount(_))
        ));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn test_explorer_url() {
        let client = mock_client(MockTransport::replying(Value::Null));
        let tx = client.transaction("abc");
        assert_eq!(tx.explorer_url(), "https://solscan.io/tx/abc?cluster=devnet");
        assert_eq!(tx.to_string(), "abc");
    }
}
