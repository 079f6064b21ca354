use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

/// A `getTransaction` result, reduced to the fields used to derive transfer amounts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub block_time: Option<i64>,
    pub meta: TransactionMeta,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    /// `null` when the transaction succeeded.
    pub err: Option<Value>,
    #[serde(default)]
    pub fee: u64,
    /// Lamport balances by account position, before execution.
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
    /// Only populated for transactions that move SPL tokens.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub pre_token_balances: Vec<TokenBalance>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub post_token_balances: Vec<TokenBalance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: u32,
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    pub ui_token_amount: UiTokenAmount,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    /// Deprecated by the node in favour of `amount`; `null` for zero balances on some versions.
    #[serde(default)]
    pub ui_amount: Option<f64>,
    pub decimals: u8,
    /// Raw balance in base units.
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub ui_amount_string: Option<String>,
}

/// An entry of a `getSignaturesForAddress` result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub block_time: Option<i64>,
}
