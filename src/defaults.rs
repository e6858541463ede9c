//! Central place for all default values.
//! Update these and the whole app picks them up.

pub struct Defaults;

impl Defaults {

    /* Network */
    pub const NETWORK_ID: &'static str = "testnet";
    pub const RPC_TIMEOUT_SECS: u64 = 60;
    pub const FINALITY: &'static str = "final";

    /* Key files */
    pub const KEYS_DIR: &'static str = "./keys";

    /* Configuration */
    pub const ENV_FILE: &'static str = ".env";

    /* Function calls */
    pub const FUNCTION_CALL_GAS: u64 = 300_000_000_000_000; // 300 Tgas
    pub const STAKE_METHOD: &'static str = "deposit_and_stake";
    pub const EMPTY_ARGS: &'static [u8] = b"{}";

    /// NEAR has 24 decimals: 1 NEAR = 10^24 yoctoNEAR
    pub const NEAR_NOMINATION_EXP: usize = 24;

    /// `https://rpc.<network>.near.org`
    pub fn rpc_url(network_id: &str) -> String {
        format!("https://rpc.{network_id}.near.org")
    }
}
