use std::io::BufRead;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

use crate::actions::{ActionOutput, Accounts, Request};
use crate::env::EnvSource;
use crate::error::ExecError;
use crate::rpc::NearRpc;

pub const MENU: &str = "\
Choose an option:
1. Create a new sub-account
2. Delete a sub-account
3. Transfer NEAR Tokens from one account to another
4. Add a key to an account
5. List keys of an account
6. Delete a key from an account
7. Stake tokens at a validator node
8. Make a function call";

pub const WRONG_OPTION: &str = "Wrong option.!";

/// Map a menu choice to its request, pulling parameters from `env`.
/// `Ok(None)` means the choice is not one of the eight options.
pub fn select(option: &str, env: &EnvSource) -> Result<Option<Request>, ExecError> {
    let secret = |name: &str| env.require(name).map(Zeroizing::new);

    let req = match option.trim() {
        "1" => Request::CreateAccount {
            sender: env.require("M1_ACCOUNT_1")?,
            sender_key: secret("M1_PRIVATE_KEY")?,
            new_account_id: env.require("M1_ACCOUNT_ID")?,
            amount: env.require("M1_VALUE")?,
        },
        "2" => Request::DeleteAccount {
            sender: env.require("M2_ACCOUNT_1")?,
            sender_key: secret("M2_PRIVATE_KEY")?,
        },
        "3" => Request::Transfer {
            sender: env.require("M3_ACCOUNT_1")?,
            sender_key: secret("M3_PRIVATE_KEY")?,
            receiver: env.require("M3_ACCOUNT_2")?,
            amount: env.require("M3_VALUE")?,
        },
        "4" => Request::AddKey {
            sender: env.require("M4_ACCOUNT")?,
            sender_key: secret("M4_PRIVATE_KEY")?,
        },
        "5" => Request::ListKeys { account: env.require("M5_ACCOUNT")? },
        "6" => Request::RemoveKey {
            sender: env.require("M6_ACCOUNT")?,
            sender_key: secret("M6_PRIVATE_KEY")?,
            key: env.require("M6_KEY")?,
        },
        "7" => Request::StakeCall {
            sender: env.require("M7_ACCOUNT_1")?,
            sender_key: secret("M7_PRIVATE_KEY")?,
            pool: env.require("M7_ACCOUNT_ID")?,
            amount: env.require("M7_VALUE")?,
        },
        "8" => Request::FunctionCall {
            sender: env.require("M8_ACCOUNT_1")?,
            sender_key: secret("M8_PRIVATE_KEY")?,
            contract: env.require("M8_ACCOUNT_ID")?,
            method_name: env.require("M8_METHOD_NAME")?,
        },
        _ => return Ok(None),
    };
    Ok(Some(req))
}

/// Print the menu, read one line, run at most one action.
/// `Ok(None)` when the choice was not a menu option.
pub async fn run_menu<R: BufRead, P: NearRpc>(
    mut input: R,
    env: &EnvSource,
    accounts: &Accounts<P>,
) -> Result<Option<Result<ActionOutput, ExecError>>> {
    println!("{MENU}");
    let mut line = String::new();
    input.read_line(&mut line).context("reading menu choice from stdin")?;

    let request = match select(&line, env) {
        Ok(Some(req)) => req,
        Ok(None) => {
            println!("{WRONG_OPTION}");
            return Ok(None);
        }
        Err(e) => return Ok(Some(Err(e))),
    };
    Ok(Some(accounts.run(request).await))
}
