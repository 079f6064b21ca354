use std::time::Duration;
use typed_builder::TypedBuilder;

/// Whether the HTTPS transport checks the server certificate and host name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    Enabled,
    /// Accepts any certificate for any host. Only meant for local validators behind self-signed certs.
    Disabled,
}

/// Options for [`crate::SolanaClient::new`].
///
/// ```
/// use solana_tx_verifier::ClientOptions;
/// use std::time::Duration;
///
/// let options = ClientOptions::builder()
///     .custom_rpc("https://rpc.example.org")
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ClientOptions {
    /// Use the devnet preset. `custom_rpc` is ignored when set.
    #[builder(default)]
    pub testnet: bool,

    /// Overrides the mainnet RPC host.
    #[builder(default, setter(strip_option, into))]
    pub custom_rpc: Option<String>,

    /// Per-request timeout. No timeout unless set.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,

    #[builder(default)]
    pub tls: TlsVerification,
}
