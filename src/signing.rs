use sha2::{Digest, Sha256};

use crate::encoding::to_borsh;
use crate::error::ExecError;
use crate::key::KeyPair;
use crate::types::{SignedTransaction, Transaction};

/// A transaction with everything the executor prints or sends about it
#[derive(Debug)]
pub struct SignedTx {
    /// Borsh bytes of the unsigned transaction
    pub unsigned_bytes: Vec<u8>,
    /// sha256(unsigned_bytes), the message that gets signed
    pub hash: [u8; 32],
    pub signed: SignedTransaction,
}

/// Serialize, hash, sign.
pub fn sign_transaction(key: &KeyPair, transaction: Transaction) -> Result<SignedTx, ExecError> {
    let unsigned_bytes = to_borsh(&transaction)?;
    let hash: [u8; 32] = Sha256::digest(&unsigned_bytes).into();
    let signature = key.sign(&hash);
    Ok(SignedTx {
        unsigned_bytes,
        hash,
        signed: SignedTransaction { transaction, signature },
    })
}
