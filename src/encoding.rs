use base64::prelude::*;
use borsh::BorshSerialize;

use crate::error::ExecError;
use crate::types::SignedTransaction;

/// Canonical Borsh bytes of any wire type
pub fn to_borsh<T: BorshSerialize>(value: &T) -> Result<Vec<u8>, ExecError> {
    Ok(borsh::to_vec(value)?)
}

/// Base64 of the Borsh-encoded envelope, the form `broadcast_tx_commit` takes
pub fn encode_signed_transaction(signed: &SignedTransaction) -> Result<String, ExecError> {
    Ok(BASE64_STANDARD.encode(to_borsh(signed)?))
}

/// 32-byte hash from its base58 form (block hashes in RPC results)
pub fn decode_hash32(b58: &str) -> Result<[u8; 32], ExecError> {
    let bytes = bs58::decode(b58)
        .into_vec()
        .map_err(|e| ExecError::MalformedResponse(format!("block hash '{b58}': {e}")))?;
    bytes.as_slice().try_into().map_err(|_| {
        ExecError::MalformedResponse(format!("block hash must be 32 bytes, got {}", bytes.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_block_hash() {
        let raw = [9u8; 32];
        let b58 = bs58::encode(raw).into_string();
        assert_eq!(decode_hash32(&b58).unwrap(), raw);
    }

    #[test]
    fn rejects_short_or_garbage_hash() {
        assert!(matches!(decode_hash32("abc"), Err(ExecError::MalformedResponse(_))));
        assert!(matches!(decode_hash32("0OIl"), Err(ExecError::MalformedResponse(_))));
    }
}
