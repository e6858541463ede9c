use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use ed25519_dalek::{Signer, SigningKey};
use rand_core::{CryptoRngCore, OsRng};
use zeroize::Zeroizing;

use crate::error::KeyError;

const ED25519_PREFIX: &str = "ed25519";

/// Public half of an access key. The Borsh tag byte is the key type (0 = ed25519).
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum PublicKey {
    Ed25519([u8; 32]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Signature {
    Ed25519([u8; 64]),
}

/// Ed25519 signing key. Secret bytes are wiped on drop by `ed25519-dalek`.
pub struct KeyPair {
    signing: SigningKey,
}

/// Split `ed25519:<base58>` (prefix optional) and decode the payload
fn decode_key_string(s: &str) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let s = s.trim();
    let (ty, data) = s.split_once(':').unwrap_or((ED25519_PREFIX, s));
    if !ty.eq_ignore_ascii_case(ED25519_PREFIX) {
        return Err(KeyError::UnsupportedType(ty.to_string()));
    }
    Ok(Zeroizing::new(bs58::decode(data).into_vec()?))
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            PublicKey::Ed25519(b) => b,
        }
    }

    /// Accept either a public key or a secret key string; a secret key yields
    /// its public half.
    pub fn from_public_or_secret(s: &str) -> Result<PublicKey, KeyError> {
        let bytes = decode_key_string(s)?;
        match bytes.len() {
            32 => {
                let mut pk = [0u8; 32];
                pk.copy_from_slice(&bytes);
                Ok(PublicKey::Ed25519(pk))
            }
            _ => Ok(s.parse::<KeyPair>()?.public_key()),
        }
    }

    #[cfg(test)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        use ed25519_dalek::{Verifier, VerifyingKey};

        let Ok(vk) = VerifyingKey::from_bytes(self.as_bytes()) else {
            return false;
        };
        let Signature::Ed25519(sig) = signature;
        vk.verify(message, &ed25519_dalek::Signature::from_bytes(sig)).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ED25519_PREFIX}:{}", bs58::encode(self.as_bytes()).into_string())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_key_string(s)?;
        let pk: [u8; 32] = bytes.as_slice().try_into().map_err(|_| KeyError::Length {
            expected: "32",
            got: bytes.len(),
        })?;
        Ok(PublicKey::Ed25519(pk))
    }
}

impl KeyPair {
    /// Fresh key from the OS CSPRNG
    pub fn from_random() -> Self {
        Self::generate(&mut OsRng)
    }

    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        KeyPair { signing: SigningKey::generate(rng) }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.signing.verifying_key().to_bytes())
    }

    /// `ed25519:<base58(seed || public)>`, the form the key files store
    pub fn secret_key(&self) -> Zeroizing<String> {
        let bytes = Zeroizing::new(self.signing.to_keypair_bytes());
        Zeroizing::new(format!(
            "{ED25519_PREFIX}:{}",
            bs58::encode(&bytes[..]).into_string()
        ))
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::Ed25519(self.signing.sign(message).to_bytes())
    }
}

impl FromStr for KeyPair {
    type Err = KeyError;

    /// Accepts the 64-byte keypair form or a bare 32-byte seed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_key_string(s)?;
        let signing = match bytes.len() {
            64 => {
                let mut kp = Zeroizing::new([0u8; 64]);
                kp.copy_from_slice(&bytes);
                SigningKey::from_keypair_bytes(&kp)?
            }
            32 => {
                let mut seed = Zeroizing::new([0u8; 32]);
                seed.copy_from_slice(&bytes);
                SigningKey::from_bytes(&seed)
            }
            got => return Err(KeyError::Length { expected: "64 (or a 32-byte seed)", got }),
        };
        Ok(KeyPair { signing })
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key().to_string())
            .finish_non_exhaustive()
    }
}
