use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::actions::Request;
use crate::defaults::Defaults;

/// NEAR account utility: sub-accounts, transfers, access keys, staking, contract calls
#[derive(Parser, Debug)]
#[command(version, about = "NEAR account management utility")]
pub struct Cli {
    /// `.env` file holding the M1_* .. M8_* menu variables (optional)
    #[arg(long, default_value = Defaults::ENV_FILE)]
    pub env_file: PathBuf,

    /// Network id (default: $NEAR_NETWORK, then testnet)
    #[arg(long)]
    pub network: Option<String>,

    /// JSON-RPC endpoint (default: $NEAR_RPC_URL, then https://rpc.<network>.near.org)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Directory for generated secret keys (default: $NEAR_KEYS_DIR, then ./keys)
    #[arg(long)]
    pub keys_dir: Option<PathBuf>,

    /// Per-request RPC timeout in seconds
    #[arg(long, default_value_t = Defaults::RPC_TIMEOUT_SECS)]
    pub rpc_timeout_secs: u64,

    /// Without a subcommand the interactive menu runs
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick one of the eight actions from a menu; parameters come from the environment
    Menu,

    /// Create a sub-account funded by the sender, with a fresh full-access key
    CreateAccount {
        #[arg(long)]
        sender: String,
        /// Sender secret key, ed25519:<base58>
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        new_account_id: String,
        /// Initial balance in NEAR (e.g. 1.5)
        #[arg(long)]
        amount: String,
    },

    /// Delete the sender account, sending the remaining balance to itself
    DeleteAccount {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
    },

    /// Transfer NEAR tokens
    Transfer {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        receiver: String,
        /// Amount in NEAR (e.g. 2 or 0.25)
        #[arg(long)]
        amount: String,
    },

    /// Add a freshly generated full-access key to the sender
    AddKey {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
    },

    /// Print the access keys of an account
    ListKeys {
        #[arg(long)]
        account: String,
    },

    /// Delete an access key (public key, or the secret key it belongs to)
    RemoveKey {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        key: String,
    },

    /// Stake directly with a validator key
    Stake {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        validator: String,
        /// Validator public key, ed25519:<base58>
        #[arg(long)]
        validator_key: String,
        #[arg(long)]
        amount: String,
    },

    /// Deposit and stake through a staking-pool contract
    StakeCall {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        pool: String,
        #[arg(long)]
        amount: String,
    },

    /// Call a contract method with empty arguments
    FunctionCall {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        sender_key: String,
        #[arg(long)]
        contract: String,
        #[arg(long)]
        method_name: String,
    },

    /// Generate Ed25519 key pairs offline (no network calls)
    Keygen {
        /// Number of keypairs to generate
        #[arg(long, default_value = "1")]
        count: u32,

        /// Optional path to write JSON output (pretty-printed)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Command {
    /// The action a subcommand stands for; `Menu` and `Keygen` have none
    pub fn into_request(self) -> Option<Request> {
        let req = match self {
            Command::Menu | Command::Keygen { .. } => return None,
            Command::CreateAccount { sender, sender_key, new_account_id, amount } => {
                Request::CreateAccount {
                    sender,
                    sender_key: Zeroizing::new(sender_key),
                    new_account_id,
                    amount,
                }
            }
            Command::DeleteAccount { sender, sender_key } => Request::DeleteAccount {
                sender,
                sender_key: Zeroizing::new(sender_key),
            },
            Command::Transfer { sender, sender_key, receiver, amount } => Request::Transfer {
                sender,
                sender_key: Zeroizing::new(sender_key),
                receiver,
                amount,
            },
            Command::AddKey { sender, sender_key } => Request::AddKey {
                sender,
                sender_key: Zeroizing::new(sender_key),
            },
            Command::ListKeys { account } => Request::ListKeys { account },
            Command::RemoveKey { sender, sender_key, key } => Request::RemoveKey {
                sender,
                sender_key: Zeroizing::new(sender_key),
                key,
            },
            Command::Stake { sender, sender_key, validator, validator_key, amount } => {
                Request::Stake {
                    sender,
                    sender_key: Zeroizing::new(sender_key),
                    validator,
                    validator_key,
                    amount,
                }
            }
            Command::StakeCall { sender, sender_key, pool, amount } => Request::StakeCall {
                sender,
                sender_key: Zeroizing::new(sender_key),
                pool,
                amount,
            },
            Command::FunctionCall { sender, sender_key, contract, method_name } => {
                Request::FunctionCall {
                    sender,
                    sender_key: Zeroizing::new(sender_key),
                    contract,
                    method_name,
                }
            }
        };
        Some(req)
    }
}
