/// Cluster identifier of the canonical mainnet. Explorer links for any other cluster carry a `?cluster=` query.
pub const MAINNET_CLUSTER: &str = "mainnet-beta";

/// A resolved Solana cluster endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub cluster: &'static str,
    pub name: &'static str,
    pub host: String,
    pub explorer: &'static str,
    pub chain_id: u64,
}

struct Preset {
    cluster: &'static str,
    name: &'static str,
    host: &'static str,
    explorer: &'static str,
    chain_id: u64,
}

const MAINNET: Preset = Preset {
    cluster: MAINNET_CLUSTER,
    name: "Mainnet",
    host: "https://api.mainnet-beta.solana.com/",
    explorer: "https://solscan.io/",
    chain_id: 101,
};

const TESTNET: Preset = Preset {
    cluster: "testnet",
    name: "Testnet",
    host: "https://api.testnet.solana.com",
    explorer: "https://solscan.io/",
    chain_id: 102,
};

const DEVNET: Preset = Preset {
    cluster: "devnet",
    name: "Devnet",
    host: "https://api.devnet.solana.com",
    explorer: "https://solscan.io/",
    chain_id: 103,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl From<Network> for NetworkConfig {
    fn from(value: Network) -> Self {
        let preset = match value {
            Network::Mainnet => MAINNET,
            Network::Testnet => TESTNET,
            Network::Devnet => DEVNET,
        };

        NetworkConfig {
            cluster: preset.cluster,
            name: preset.name,
            host: preset.host.to_string(),
            explorer: preset.explorer,
            chain_id: preset.chain_id,
        }
    }
}

impl NetworkConfig {
    /// Resolves the endpoint for the `testnet` / `custom_rpc` construction options.
    ///
    /// `testnet` selects the devnet preset and ignores `custom_rpc`; otherwise the mainnet preset is used,
    /// with its host replaced by `custom_rpc` when one is given.
    pub fn resolve(testnet: bool, custom_rpc: Option<&str>) -> Self {
        if testnet {
            return Network::Devnet.into();
        }

        let mut network: NetworkConfig = Network::Mainnet.into();
        if let Some(host) = custom_rpc.filter(|host| !host.is_empty()) {
            network.host = host.to_string();
        }
        network
    }

    /// Explorer link for a transaction signature on this cluster.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        let mut url = format!("{}tx/{signature}", self.explorer);
        if self.cluster != MAINNET_CLUSTER {
            url.push_str("?cluster=");
            url.push_str(self.cluster);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_mainnet() {
        let network = NetworkConfig::resolve(false, None);
        assert_eq!(network.cluster, "mainnet-beta");
        assert_eq!(network.host, "https://api.mainnet-beta.solana.com/");
    }

    #[test]
    fn test_resolve_custom_rpc_overrides_mainnet_only() {
        let network = NetworkConfig::resolve(false, Some("https://rpc.example.org"));
        assert_eq!(network.cluster, "mainnet-beta");
        assert_eq!(network.host, "https://rpc.example.org");

        let network = NetworkConfig::resolve(true, Some("https://rpc.example.org"));
        assert_eq!(network.cluster, "devnet");
        assert_eq!(network.host, "https://api.devnet.solana.com");
    }

    #[test]
    fn test_explorer_url() {
        let mainnet: NetworkConfig = Network::Mainnet.into();
        assert_eq!(mainnet.explorer_tx_url("abc"), "https://solscan.io/tx/abc");

        let devnet: NetworkConfig = Network::Devnet.into();
        assert_eq!(
            devnet.explorer_tx_url("abc"),
            "https://solscan.io/tx/abc?cluster=devnet"
        );
    }
}
