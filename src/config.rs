use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::defaults::Defaults;
use crate::env::EnvSource;

/// Where to send requests and where to keep generated keys.
/// Each value: CLI flag, then environment / `.env`, then default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub network_id: String,
    pub rpc_url: String,
    pub keys_dir: PathBuf,
    pub rpc_timeout: Duration,
}

impl Settings {
    pub fn resolve(cli: &Cli, env: &EnvSource) -> Self {
        let network_id = cli
            .network
            .clone()
            .or_else(|| env.get("NEAR_NETWORK"))
            .unwrap_or_else(|| Defaults::NETWORK_ID.to_string());
        let rpc_url = cli
            .rpc_url
            .clone()
            .or_else(|| env.get("NEAR_RPC_URL"))
            .unwrap_or_else(|| Defaults::rpc_url(&network_id));
        let keys_dir = cli
            .keys_dir
            .clone()
            .or_else(|| env.get("NEAR_KEYS_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(Defaults::KEYS_DIR));

        Settings {
            network_id,
            rpc_url,
            keys_dir,
            rpc_timeout: Duration::from_secs(cli.rpc_timeout_secs),
        }
    }
}
