use crate::Error;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt::Display;
use std::str::FromStr;

macro_rules! rpc_methods {
    ($($variant:ident => $name:literal,)+) => {
        /// Closed set of JSON-RPC methods the client is allowed to call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
        pub enum RpcMethod {
            $($variant,)+
        }

        impl RpcMethod {
            pub const ALL: &'static [RpcMethod] = &[$(RpcMethod::$variant,)+];

            pub fn as_method_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn from_method_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

rpc_methods! {
    GetAccountInfo => "getAccountInfo",
    GetBalance => "getBalance",
    GetBlock => "getBlock",
    GetBlockHeight => "getBlockHeight",
    GetBlockProduction => "getBlockProduction",
    GetBlockCommitment => "getBlockCommitment",
    GetBlocks => "getBlocks",
    GetBlocksWithLimit => "getBlocksWithLimit",
    GetBlockTime => "getBlockTime",
    GetClusterNodes => "getClusterNodes",
    GetEpochInfo => "getEpochInfo",
    GetEpochSchedule => "getEpochSchedule",
    GetFeeForMessage => "getFeeForMessage",
    GetFirstAvailableBlock => "getFirstAvailableBlock",
    GetGenesisHash => "getGenesisHash",
    GetHealth => "getHealth",
    GetHighestSnapshotSlot => "getHighestSnapshotSlot",
    GetIdentity => "getIdentity",
    GetInflationGovernor => "getInflationGovernor",
    GetInflationRate => "getInflationRate",
    GetInflationReward => "getInflationReward",
    GetLargestAccounts => "getLargestAccounts",
    GetLatestBlockhash => "getLatestBlockhash",
    GetLeaderSchedule => "getLeaderSchedule",
    GetMaxRetransmitSlot => "getMaxRetransmitSlot",
    GetMaxShredInsertSlot => "getMaxShredInsertSlot",
    GetMinimumBalanceForRentExemption => "getMinimumBalanceForRentExemption",
    GetMultipleAccounts => "getMultipleAccounts",
    GetProgramAccounts => "getProgramAccounts",
    GetRecentPerformanceSamples => "getRecentPerformanceSamples",
    GetSignaturesForAddress => "getSignaturesForAddress",
    GetSignatureStatuses => "getSignatureStatuses",
    GetSlot => "getSlot",
    GetSlotLeader => "getSlotLeader",
    GetSlotLeaders => "getSlotLeaders",
    GetStakeActivation => "getStakeActivation",
    GetSupply => "getSupply",
    GetTokenAccountBalance => "getTokenAccountBalance",
    GetTokenAccountsByDelegate => "getTokenAccountsByDelegate",
    GetTokenAccountsByOwner => "getTokenAccountsByOwner",
    GetTokenLargestAccounts => "getTokenLargestAccounts",
    GetTokenSupply => "getTokenSupply",
    GetTransaction => "getTransaction",
    GetTransactionCount => "getTransactionCount",
    GetVersion => "getVersion",
    GetVoteAccounts => "getVoteAccounts",
    IsBlockhashValid => "isBlockhashValid",
    MinimumLedgerSlot => "minimumLedgerSlot",
    RequestAirdrop => "requestAirdrop",
    SendTransaction => "sendTransaction",
    SimulateTransaction => "simulateTransaction",
    AccountSubscribe => "accountSubscribe",
    AccountUnsubscribe => "accountUnsubscribe",
    LogsSubscribe => "logsSubscribe",
    LogsUnsubscribe => "logsUnsubscribe",
    ProgramSubscribe => "programSubscribe",
    ProgramUnsubscribe => "programUnsubscribe",
    SignatureSubscribe => "signatureSubscribe",
    SignatureUnsubscribe => "signatureUnsubscribe",
    SlotSubscribe => "slotSubscribe",
    SlotUnsubscribe => "slotUnsubscribe",
}

impl FromStr for RpcMethod {
    type Err = Error;

    /// Checks the name is alphanumeric before looking it up, so malformed names never reach the allow-list.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidMethodName(name.to_string()));
        }

        Self::from_method_name(name).ok_or_else(|| Error::UnallowedMethod(name.to_string()))
    }
}

impl Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_method_name())
    }
}
