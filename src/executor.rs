//! The one place that signs and submits. Every transaction-producing action
//! ends here.

use tracing::{debug, info, warn};

use crate::encoding::{decode_hash32, encode_signed_transaction};
use crate::error::ExecError;
use crate::key::KeyPair;
use crate::rpc::NearRpc;
use crate::signing::sign_transaction;
use crate::types::{Action, FinalExecutionStatus, Transaction};

pub const SUCCESS_MESSAGE: &str = "Transaction Successfully Executed.!";

/// What a committed, non-failed transaction leaves behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub transaction_hash: String,
    pub nonce: u64,
}

/// Look up nonce and block hash, sign, broadcast, and check the final status.
pub async fn execute_transaction<P: NearRpc + ?Sized>(
    rpc: &P,
    signer_id: &str,
    signer_key: &str,
    receiver_id: &str,
    actions: Vec<Action>,
) -> Result<TxOutcome, ExecError> {
    let key: KeyPair = signer_key.parse()?;
    let public_key = key.public_key();

    let access = rpc.view_access_key(signer_id, &public_key).await?;
    let nonce = access
        .nonce
        .checked_add(1)
        .ok_or_else(|| ExecError::MalformedResponse("access key nonce overflow".into()))?;
    let block_hash = decode_hash32(&access.block_hash)?;
    debug!(signer_id, nonce, block_height = access.block_height, "access key found");

    let transaction = Transaction {
        signer_id: signer_id.to_string(),
        public_key,
        nonce,
        receiver_id: receiver_id.to_string(),
        block_hash,
        actions,
    };

    let tx = sign_transaction(&key, transaction)?;
    println!("Serialized, Unsigned Transaction HEX: {}", hex::encode(&tx.unsigned_bytes));
    println!("serializedTxHash {}", hex::encode(tx.hash));

    let encoded = encode_signed_transaction(&tx.signed)?;
    let outcome = rpc.broadcast_tx_commit(&encoded).await?;

    match outcome.status {
        FinalExecutionStatus::Failure(err) => {
            let kind = err.kind();
            warn!(signer_id, receiver_id, nonce, %kind, "transaction rejected");
            Err(ExecError::TransactionFailed { kind })
        }
        status => {
            if let FinalExecutionStatus::SuccessValue(value) = &status {
                debug!(return_value = %value, "base64 return value");
            }
            info!(signer_id, receiver_id, nonce, hash = %outcome.transaction.hash, "transaction committed");
            Ok(TxOutcome { transaction_hash: outcome.transaction.hash, nonce })
        }
    }
}

/// Console wording for the result of an action.
pub fn outcome_message<T>(result: &Result<T, ExecError>) -> String {
    match result {
        Ok(_) => SUCCESS_MESSAGE.to_string(),
        Err(e) => match e.failure_kind() {
            Some(kind) => format!("Transaction Failed. Error: {kind}"),
            None => format!("Something went wrong. Error: {e}"),
        },
    }
}
