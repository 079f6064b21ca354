use dotenv::dotenv;
use envconfig::Envconfig;
use eyre::Result;
use solana_tx_verifier::prelude::*;
use std::time::Duration;
use tracing::*;

#[derive(Envconfig, Debug)]
pub struct Config {
    #[envconfig(from = "SOLANA_TESTNET", default = "false")]
    pub testnet: bool,
    #[envconfig(from = "SOLANA_RPC_URL")]
    pub rpc_url: Option<String>,
    #[envconfig(from = "SOLANA_RPC_TIMEOUT_SECS", default = "30")]
    pub timeout_secs: u64,
}

impl Config {
    /// Loads `.env` if there is one, then reads the environment.
    pub fn load() -> Result<Config> {
        if let Err(err) = dotenv() {
            debug!(%err, "no .env loaded");
        }

        let config = Config::init_from_env()?;
        info!(?config, "config");
        Ok(config)
    }

    pub fn client(&self) -> Result<SolanaClient> {
        let options = ClientOptions {
            testnet: self.testnet,
            custom_rpc: self.rpc_url.clone(),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            tls: TlsVerification::Enabled,
        };

        Ok(SolanaClient::new(options)?)
    }
}
