use anyhow::{Context, Result};
use rand_core::CryptoRngCore;
use serde::Serialize;
use std::{fs, path::PathBuf};

use crate::key::KeyPair;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    pub secret_key: String,            // ed25519:<base58 of 64 bytes>
    pub public_key: String,            // ed25519:<base58 of 32 bytes>
    pub implicit_account_id: String,   // lowercase hex of the public key
}

pub fn generate<R: CryptoRngCore + ?Sized>(count: u32, rng: &mut R) -> Vec<KeyRecord> {
    let mut out: Vec<KeyRecord> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let kp = KeyPair::generate(rng);
        let pk = kp.public_key();

        out.push(KeyRecord {
            secret_key: kp.secret_key().to_string(),
            public_key: pk.to_string(),
            // implicit accounts are named by their key
            implicit_account_id: hex::encode(pk.as_bytes()),
        });
    }

    out
}

pub fn emit(records: Vec<KeyRecord>, out: Option<PathBuf>) -> Result<()> {
    if let Some(p) = out {
        let json = serde_json::to_string_pretty(&records)?;
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&p, json).with_context(|| format!("writing {}", p.display()))?;
        println!("✓ Wrote {}", p.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    Ok(())
}
