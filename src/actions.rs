use std::path::PathBuf;

use tracing::{error, info};
use zeroize::Zeroizing;

use crate::commands::key_save::append_secret_key;
use crate::defaults::Defaults;
use crate::error::ExecError;
use crate::executor::{execute_transaction, TxOutcome};
use crate::key::{KeyPair, PublicKey};
use crate::rpc::NearRpc;
use crate::types::{
    add_full_access_key, create_account, delete_account, delete_key, function_call, stake,
    transfer, AccessKeyList,
};
use crate::util::{format_near_amount, parse_near_amount};

/// Secret key text as it came from the environment or the command line
pub type SecretString = Zeroizing<String>;

/// One action with its parameters, however it was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreateAccount { sender: String, sender_key: SecretString, new_account_id: String, amount: String },
    DeleteAccount { sender: String, sender_key: SecretString },
    Transfer { sender: String, sender_key: SecretString, receiver: String, amount: String },
    AddKey { sender: String, sender_key: SecretString },
    ListKeys { account: String },
    RemoveKey { sender: String, sender_key: SecretString, key: String },
    Stake { sender: String, sender_key: SecretString, validator: String, validator_key: String, amount: String },
    StakeCall { sender: String, sender_key: SecretString, pool: String, amount: String },
    FunctionCall { sender: String, sender_key: SecretString, contract: String, method_name: String },
}

/// What a finished action produced
#[derive(Debug)]
pub enum ActionOutput {
    Executed(TxOutcome),
    Keys(AccessKeyList),
}

/// The account operations, bound to one RPC endpoint and one key directory
pub struct Accounts<P> {
    rpc: P,
    keys_dir: PathBuf,
}

impl<P: NearRpc> Accounts<P> {
    pub fn new(rpc: P, keys_dir: PathBuf) -> Self {
        Accounts { rpc, keys_dir }
    }

    #[cfg(test)]
    pub fn rpc(&self) -> &P {
        &self.rpc
    }

    pub async fn run(&self, request: Request) -> Result<ActionOutput, ExecError> {
        let executed = match request {
            Request::CreateAccount { sender, sender_key, new_account_id, amount } => {
                self.create_account(&sender, &sender_key, &new_account_id, &amount).await
            }
            Request::DeleteAccount { sender, sender_key } => {
                self.delete_account(&sender, &sender_key).await
            }
            Request::Transfer { sender, sender_key, receiver, amount } => {
                self.transfer(&sender, &sender_key, &receiver, &amount).await
            }
            Request::AddKey { sender, sender_key } => self.add_key(&sender, &sender_key).await,
            Request::ListKeys { account } => {
                return self.list_keys(&account).await.map(ActionOutput::Keys)
            }
            Request::RemoveKey { sender, sender_key, key } => {
                self.remove_key(&sender, &sender_key, &key).await
            }
            Request::Stake { sender, sender_key, validator, validator_key, amount } => {
                self.stake(&sender, &sender_key, &validator, &validator_key, &amount).await
            }
            Request::StakeCall { sender, sender_key, pool, amount } => {
                self.stake_call(&sender, &sender_key, &pool, &amount).await
            }
            Request::FunctionCall { sender, sender_key, contract, method_name } => {
                self.function_call(&sender, &sender_key, &contract, &method_name).await
            }
        };
        executed.map(ActionOutput::Executed)
    }

    /// Transfer NEAR from one account to another. Either side may be an implicit account.
    pub async fn transfer(
        &self,
        sender: &str,
        sender_key: &str,
        receiver: &str,
        amount: &str,
    ) -> Result<TxOutcome, ExecError> {
        let deposit = parse_near_amount(amount)?;
        info!(sender, receiver, near = %format_near_amount(deposit), "transfer");
        execute_transaction(&self.rpc, sender, sender_key, receiver, vec![transfer(deposit)]).await
    }

    /// Add a freshly generated full-access key to `sender`.
    pub async fn add_key(&self, sender: &str, sender_key: &str) -> Result<TxOutcome, ExecError> {
        let new_key = self.generate_and_save(sender);
        let actions = vec![add_full_access_key(new_key.public_key())];
        execute_transaction(&self.rpc, sender, sender_key, sender, actions).await
    }

    /// Read-only: nothing is signed or sent
    pub async fn list_keys(&self, account: &str) -> Result<AccessKeyList, ExecError> {
        let list = self.rpc.view_access_key_list(account).await?;
        println!("Keys {}", serde_json::to_string_pretty(&list.keys)?);
        Ok(list)
    }

    /// `key` may be the public key or the secret key it belongs to
    pub async fn remove_key(
        &self,
        sender: &str,
        sender_key: &str,
        key: &str,
    ) -> Result<TxOutcome, ExecError> {
        let target = PublicKey::from_public_or_secret(key)?;
        info!(sender, key = %target, "remove key");
        execute_transaction(&self.rpc, sender, sender_key, sender, vec![delete_key(target)]).await
    }

    /// Create `new_account_id`, fund it with `amount`, and give it a fresh
    /// full-access key whose secret goes to the new account's key file.
    pub async fn create_account(
        &self,
        sender: &str,
        sender_key: &str,
        new_account_id: &str,
        amount: &str,
    ) -> Result<TxOutcome, ExecError> {
        let deposit = parse_near_amount(amount)?;
        let new_key = self.generate_and_save(new_account_id);
        let actions = vec![
            create_account(),
            transfer(deposit),
            add_full_access_key(new_key.public_key()),
        ];
        execute_transaction(&self.rpc, sender, sender_key, new_account_id, actions).await
    }

    /// Remaining balance goes back to the deleted account's own id
    pub async fn delete_account(&self, sender: &str, sender_key: &str) -> Result<TxOutcome, ExecError> {
        let actions = vec![delete_account(sender.to_string())];
        execute_transaction(&self.rpc, sender, sender_key, sender, actions).await
    }

    pub async fn stake(
        &self,
        sender: &str,
        sender_key: &str,
        validator: &str,
        validator_key: &str,
        amount: &str,
    ) -> Result<TxOutcome, ExecError> {
        let amount = parse_near_amount(amount)?;
        let validator_key: PublicKey = validator_key.parse()?;
        execute_transaction(&self.rpc, sender, sender_key, validator, vec![stake(amount, validator_key)]).await
    }

    /// Stake through a staking-pool contract's `deposit_and_stake`
    pub async fn stake_call(
        &self,
        sender: &str,
        sender_key: &str,
        pool: &str,
        amount: &str,
    ) -> Result<TxOutcome, ExecError> {
        let deposit = parse_near_amount(amount)?;
        let actions = vec![function_call(
            Defaults::STAKE_METHOD,
            Defaults::EMPTY_ARGS,
            Defaults::FUNCTION_CALL_GAS,
            deposit,
        )];
        execute_transaction(&self.rpc, sender, sender_key, pool, actions).await
    }

    pub async fn function_call(
        &self,
        sender: &str,
        sender_key: &str,
        contract: &str,
        method_name: &str,
    ) -> Result<TxOutcome, ExecError> {
        let actions = vec![function_call(
            method_name,
            Defaults::EMPTY_ARGS,
            Defaults::FUNCTION_CALL_GAS,
            0,
        )];
        execute_transaction(&self.rpc, sender, sender_key, contract, actions).await
    }

    /// New random key, printed and appended to `<keys_dir>/<owner>`.
    /// A failed write is logged; the caller carries on with the key.
    fn generate_and_save(&self, owner: &str) -> KeyPair {
        let key = KeyPair::from_random();
        let secret = key.secret_key();
        println!("Key generated and used: {}", secret.as_str());
        match append_secret_key(&self.keys_dir, owner, &secret) {
            Ok(path) => info!(path = %path.display(), "saved generated key"),
            Err(e) => error!("could not save generated key for {owner}: {e:#}"),
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::key::tests::seeded_key;
    use crate::rpc::tests::{MockRpc, RpcCall};
    use crate::signing::tests::decode_signed_tx;
    use crate::types::{Action, FunctionCallAction};

    const ONE_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

    fn accounts(dir: &tempfile::TempDir) -> Accounts<MockRpc> {
        Accounts::new(MockRpc::default(), dir.path().join("keys"))
    }

    fn sent_actions(acc: &Accounts<MockRpc>) -> (String, Vec<Action>) {
        let b = acc.rpc().broadcasts();
        assert_eq!(b.len(), 1, "exactly one broadcast");
        let tx = decode_signed_tx(&b[0]).transaction;
        (tx.receiver_id, tx.actions)
    }

    #[tokio::test]
    async fn transfer_converts_to_yocto() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        acc.transfer("alice.testnet", &seeded_key(31).secret_key(), "bob.testnet", "2").await.unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "bob.testnet");
        assert_eq!(actions, vec![transfer(2 * ONE_NEAR)]);
    }

    #[tokio::test]
    async fn bad_amount_is_rejected_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let err = acc.transfer("alice.testnet", &seeded_key(31).secret_key(), "bob.testnet", "two").await.unwrap_err();
        assert!(matches!(err, ExecError::Amount(_)));
        assert!(acc.rpc().calls().is_empty());
    }

    #[tokio::test]
    async fn add_key_twice_appends_two_lines() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let signer = seeded_key(32);

        acc.add_key("alice.testnet", &signer.secret_key()).await.unwrap();
        acc.add_key("alice.testnet", &signer.secret_key()).await.unwrap();

        let text = fs::read_to_string(dir.path().join("keys/alice.testnet")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0], lines[1]);

        // the key on chain is the key in the file
        let last = acc.rpc().broadcasts().pop().unwrap();
        let tx = decode_signed_tx(&last).transaction;
        let saved: KeyPair = lines[1].parse().unwrap();
        assert_eq!(tx.receiver_id, "alice.testnet");
        assert_eq!(tx.actions, vec![add_full_access_key(saved.public_key())]);
    }

    #[tokio::test]
    async fn create_account_bundles_three_actions_for_the_new_account() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        acc.create_account("alice.testnet", &seeded_key(33).secret_key(), "sub.alice.testnet", "1.5")
            .await
            .unwrap();

        let text = fs::read_to_string(dir.path().join("keys/sub.alice.testnet")).unwrap();
        let saved: KeyPair = text.trim_end().parse().unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "sub.alice.testnet");
        assert_eq!(
            actions,
            vec![
                create_account(),
                transfer(1_500_000_000_000_000_000_000_000),
                add_full_access_key(saved.public_key()),
            ]
        );
    }

    #[tokio::test]
    async fn create_account_twice_keeps_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let signer = seeded_key(34);
        for _ in 0..2 {
            acc.create_account("alice.testnet", &signer.secret_key(), "sub.alice.testnet", "1").await.unwrap();
        }
        let text = fs::read_to_string(dir.path().join("keys/sub.alice.testnet")).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn unwritable_key_dir_does_not_stop_the_action() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("keys");
        fs::write(&blocker, "a file where the directory should be").unwrap();
        let acc = Accounts::new(MockRpc::default(), blocker);

        acc.add_key("alice.testnet", &seeded_key(35).secret_key()).await.unwrap();
        assert_eq!(acc.rpc().broadcasts().len(), 1);
    }

    #[tokio::test]
    async fn list_keys_only_queries() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let out = acc.run(Request::ListKeys { account: "alice.testnet".into() }).await.unwrap();

        let ActionOutput::Keys(list) = out else { panic!("expected key list") };
        assert_eq!(list.keys.len(), 1);
        assert_eq!(list.keys[0].public_key, "ed25519:FullKey");
        assert_eq!(
            acc.rpc().calls(),
            vec![RpcCall::ViewAccessKeyList { account_id: "alice.testnet".into() }]
        );
    }

    #[tokio::test]
    async fn remove_key_accepts_public_or_secret_form() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let signer = seeded_key(36);
        let target = seeded_key(37);

        acc.remove_key("alice.testnet", &signer.secret_key(), &target.secret_key()).await.unwrap();
        acc.remove_key("alice.testnet", &signer.secret_key(), &target.public_key().to_string()).await.unwrap();

        for b in acc.rpc().broadcasts() {
            let tx = decode_signed_tx(&b).transaction;
            assert_eq!(tx.receiver_id, "alice.testnet");
            assert_eq!(tx.actions, vec![delete_key(target.public_key())]);
        }
    }

    #[tokio::test]
    async fn delete_account_names_itself_as_beneficiary() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        acc.delete_account("sub.alice.testnet", &seeded_key(38).secret_key()).await.unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "sub.alice.testnet");
        assert_eq!(actions, vec![delete_account("sub.alice.testnet".into())]);
    }

    #[tokio::test]
    async fn stake_goes_to_the_validator_with_its_key() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        let validator_key = seeded_key(39).public_key();
        acc.stake("alice.testnet", &seeded_key(40).secret_key(), "validator.testnet", &validator_key.to_string(), "3")
            .await
            .unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "validator.testnet");
        assert_eq!(actions, vec![stake(3 * ONE_NEAR, validator_key)]);
    }

    #[tokio::test]
    async fn stake_call_deposits_into_the_pool() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        acc.stake_call("alice.testnet", &seeded_key(41).secret_key(), "pool.poolv1.testnet", "0.5")
            .await
            .unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "pool.poolv1.testnet");
        assert_eq!(
            actions,
            vec![Action::FunctionCall(FunctionCallAction {
                method_name: "deposit_and_stake".into(),
                args: b"{}".to_vec(),
                gas: 300_000_000_000_000,
                deposit: ONE_NEAR / 2,
            })]
        );
    }

    #[tokio::test]
    async fn function_call_has_no_deposit() {
        let dir = tempfile::tempdir().unwrap();
        let acc = accounts(&dir);
        acc.function_call("alice.testnet", &seeded_key(42).secret_key(), "counter.testnet", "increment")
            .await
            .unwrap();

        let (receiver, actions) = sent_actions(&acc);
        assert_eq!(receiver, "counter.testnet");
        let Action::FunctionCall(call) = &actions[0] else { panic!("expected a function call") };
        assert_eq!(call.method_name, "increment");
        assert_eq!(call.deposit, 0);
        assert_eq!(call.gas, 300_000_000_000_000);
        assert_eq!(call.args, b"{}");
    }

    #[tokio::test]
    async fn run_surfaces_on_chain_failure() {
        let dir = tempfile::tempdir().unwrap();
        let acc = Accounts::new(
            MockRpc {
                failure_kind: Some(serde_json::json!({"AccountDoesNotExist": {"account_id": "bob.testnet"}})),
                ..Default::default()
            },
            dir.path().to_path_buf(),
        );
        let err = acc
            .run(Request::Transfer {
                sender: "alice.testnet".into(),
                sender_key: seeded_key(43).secret_key(),
                receiver: "bob.testnet".into(),
                amount: "1".into(),
            })
            .await
            .unwrap_err();
        assert!(err.failure_kind().unwrap().contains("AccountDoesNotExist"));
    }
}
