use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::key::{PublicKey, Signature};

pub type AccountId = String;
/// yoctoNEAR
pub type Balance = u128;
pub type Gas = u64;
pub type Nonce = u64;

/* ---------- Transaction wire format (Borsh) ---------- */

/// Variant order is the on-chain tag, do not reorder.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Action {
    CreateAccount(CreateAccountAction),
    #[allow(dead_code)] // holds tag 1; no action here deploys code
    DeployContract(DeployContractAction),
    FunctionCall(FunctionCallAction),
    Transfer(TransferAction),
    Stake(StakeAction),
    AddKey(AddKeyAction),
    DeleteKey(DeleteKeyAction),
    DeleteAccount(DeleteAccountAction),
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateAccountAction {}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeployContractAction {
    pub code: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FunctionCallAction {
    pub method_name: String,
    pub args: Vec<u8>,
    pub gas: Gas,
    pub deposit: Balance,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransferAction {
    pub deposit: Balance,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakeAction {
    pub stake: Balance,
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AddKeyAction {
    pub public_key: PublicKey,
    pub access_key: AccessKey,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeleteKeyAction {
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeleteAccountAction {
    pub beneficiary_id: AccountId,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AccessKey {
    pub nonce: Nonce,
    pub permission: AccessKeyPermission,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum AccessKeyPermission {
    FunctionCall(FunctionCallPermission),
    FullAccess,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FunctionCallPermission {
    pub allowance: Option<Balance>,
    pub receiver_id: AccountId,
    pub method_names: Vec<String>,
}

impl AccessKey {
    pub fn full_access() -> Self {
        AccessKey { nonce: 0, permission: AccessKeyPermission::FullAccess }
    }
}

/* action constructors, named after what they do on chain */

pub fn create_account() -> Action {
    Action::CreateAccount(CreateAccountAction {})
}

pub fn transfer(deposit: Balance) -> Action {
    Action::Transfer(TransferAction { deposit })
}

pub fn add_full_access_key(public_key: PublicKey) -> Action {
    Action::AddKey(AddKeyAction { public_key, access_key: AccessKey::full_access() })
}

pub fn delete_key(public_key: PublicKey) -> Action {
    Action::DeleteKey(DeleteKeyAction { public_key })
}

pub fn delete_account(beneficiary_id: AccountId) -> Action {
    Action::DeleteAccount(DeleteAccountAction { beneficiary_id })
}

pub fn stake(stake: Balance, public_key: PublicKey) -> Action {
    Action::Stake(StakeAction { stake, public_key })
}

pub fn function_call(method_name: &str, args: &[u8], gas: Gas, deposit: Balance) -> Action {
    Action::FunctionCall(FunctionCallAction {
        method_name: method_name.to_string(),
        args: args.to_vec(),
        gas,
        deposit,
    })
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Transaction {
    pub signer_id: AccountId,
    pub public_key: PublicKey,
    pub nonce: Nonce,
    pub receiver_id: AccountId,
    pub block_hash: [u8; 32],
    pub actions: Vec<Action>,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

/* ---------- RPC views (JSON) ---------- */

/// `query` / `view_access_key`
#[derive(Debug, Deserialize)]
pub struct AccessKeyView {
    #[serde(default)]
    pub nonce: Nonce,
    #[serde(default)]
    pub block_hash: String,
    #[serde(default)]
    pub block_height: u64,
    /// Older nodes report lookup failures inside the result
    #[serde(default)]
    pub error: Option<String>,
}

/// `query` / `view_access_key_list`
#[derive(Debug, Deserialize)]
pub struct AccessKeyList {
    #[serde(default)]
    pub keys: Vec<AccessKeyInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AccessKeyInfo {
    pub public_key: String,
    pub access_key: AccessKeyDetails,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AccessKeyDetails {
    pub nonce: Nonce,
    pub permission: PermissionView,
}

/// `"FullAccess"` or `{"FunctionCall": {...}}`
#[derive(Debug, Deserialize, Serialize)]
pub enum PermissionView {
    FullAccess,
    FunctionCall {
        /// yoctoNEAR as a decimal string, `null` for unlimited
        allowance: Option<String>,
        receiver_id: AccountId,
        method_names: Vec<String>,
    },
}

/// `broadcast_tx_commit` result
#[derive(Debug, Deserialize)]
pub struct FinalExecutionOutcome {
    pub status: FinalExecutionStatus,
    pub transaction: TransactionView,
}

#[derive(Debug, Deserialize)]
pub struct TransactionView {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub enum FinalExecutionStatus {
    NotStarted,
    Started,
    Failure(TxExecutionError),
    SuccessValue(String),
}

#[derive(Debug, Deserialize)]
pub enum TxExecutionError {
    ActionError(ActionError),
    InvalidTxError(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct ActionError {
    pub kind: serde_json::Value,
}

impl TxExecutionError {
    /// The specific rejection reason, e.g. `{"AccountDoesNotExist":{"account_id":"bob.testnet"}}`
    pub fn kind(&self) -> String {
        match self {
            TxExecutionError::ActionError(e) => e.kind.to_string(),
            TxExecutionError::InvalidTxError(e) => format!("InvalidTxError {e}"),
        }
    }
}
