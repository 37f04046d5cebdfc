// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use agsig_endorse::api::Scheme;
use agsig_endorse::{PubKey, SecretKey};
use bls_signatures::{PrivateKey, PublicKey, Serialize, Signature, aggregate, verify_messages};
use hashlink::LruCache;
use parking_lot::RwLock;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Error, Debug)]
pub enum BLSError {
    #[error("invalid seed length: expected {BLS_SEED_LENGTH} bytes, got {0}")]
    InvalidSeedLength(usize),
    #[error("empty public keys provided")]
    EmptyPublicKeys,
    #[error("empty signatures provided")]
    EmptySignatures,
    #[error("invalid secret key length: expected {BLS_SECRET_KEY_LENGTH} bytes, got {0}")]
    InvalidSecretKeyLength(usize),
    #[error("invalid public key length: expected {BLS_PUBLIC_KEY_LENGTH} bytes, got {0}")]
    InvalidPublicKeyLength(usize),
    #[error("invalid signature length: expected {BLS_SIGNATURE_LENGTH} bytes, got {0}")]
    InvalidSignatureLength(usize),
    #[error("failed to deserialize secret key: {0}")]
    SecretKeyDeserialization(bls_signatures::Error),
    #[error("failed to deserialize public key: {0}")]
    PublicKeyDeserialization(bls_signatures::Error),
    #[error("failed to deserialize signature: {0}")]
    SignatureDeserialization(bls_signatures::Error),
    #[error("failed to aggregate signatures: {0}")]
    Aggregation(bls_signatures::Error),
    #[error("mismatched number of public keys and messages: {pub_keys} != {msgs}")]
    LengthMismatch { pub_keys: usize, msgs: usize },
}

/// Key generation seed length in bytes
const BLS_SEED_LENGTH: usize = 32;

/// BLS12-381 secret key length in bytes
const BLS_SECRET_KEY_LENGTH: usize = 32;

/// BLS12-381 public key length in bytes
const BLS_PUBLIC_KEY_LENGTH: usize = 48;

/// BLS12-381 signature length in bytes
const BLS_SIGNATURE_LENGTH: usize = 96;

/// Maximum number of cached public key points to prevent excessive memory usage
const MAX_POINT_CACHE_SIZE: usize = 10_000;

/// BLS signature scheme with public-key message augmentation
///
/// Signing and verification operate on `pub_key || msg` rather than the raw
/// message. Aggregate verification therefore requires the (public key,
/// message) pairs to be pairwise distinct, which the augmentation guarantees
/// whenever the signers of a shared message are distinct.
pub struct BLSAugScheme {
    /// Cache for deserialized public key points to avoid expensive repeated operations
    point_cache: RwLock<LruCache<Vec<u8>, PublicKey>>,
}

impl Default for BLSAugScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BLSAugScheme {
    pub fn new() -> Self {
        Self {
            point_cache: RwLock::new(LruCache::new(MAX_POINT_CACHE_SIZE)),
        }
    }

    /// Gets a cached public key or deserializes and caches it
    fn get_or_cache_public_key(&self, pub_key: &[u8]) -> Result<PublicKey, BLSError> {
        if let Some(cached) = self.point_cache.write().get(pub_key) {
            return Ok(*cached);
        }

        let typed_pub_key =
            PublicKey::from_bytes(pub_key).map_err(BLSError::PublicKeyDeserialization)?;
        self.point_cache
            .write()
            .insert(pub_key.to_vec(), typed_pub_key);
        Ok(typed_pub_key)
    }

    fn checked_pub_key(&self, pub_key: &PubKey) -> Result<PublicKey, BLSError> {
        if pub_key.0.len() != BLS_PUBLIC_KEY_LENGTH {
            return Err(BLSError::InvalidPublicKeyLength(pub_key.0.len()));
        }
        self.get_or_cache_public_key(&pub_key.0)
    }

    fn checked_signature(&self, sig: &[u8]) -> Result<Signature, BLSError> {
        if sig.len() != BLS_SIGNATURE_LENGTH {
            return Err(BLSError::InvalidSignatureLength(sig.len()));
        }
        Signature::from_bytes(sig).map_err(BLSError::SignatureDeserialization)
    }

    /// Prefixes the message with the signer's serialized public key
    fn augment(pub_key: &[u8], msg: &[u8]) -> Vec<u8> {
        let mut augmented = Vec::with_capacity(pub_key.len() + msg.len());
        augmented.extend_from_slice(pub_key);
        augmented.extend_from_slice(msg);
        augmented
    }
}

impl Scheme for BLSAugScheme {
    type Error = BLSError;

    fn key_gen(&self, seed: &[u8]) -> Result<(SecretKey, PubKey), Self::Error> {
        let seed: [u8; BLS_SEED_LENGTH] = seed
            .try_into()
            .map_err(|_| BLSError::InvalidSeedLength(seed.len()))?;

        // Expand the seed through a ChaCha stream; arbitrary seed bytes are
        // not necessarily a canonical scalar, so they can't be used directly.
        let mut rng = ChaCha20Rng::from_seed(seed);
        let private_key = PrivateKey::generate(&mut rng);
        let public_key = private_key.public_key();

        Ok((
            SecretKey::new(private_key.as_bytes()),
            PubKey::new(public_key.as_bytes()),
        ))
    }

    fn sign(&self, secret_key: &SecretKey, msg: &[u8]) -> Result<Vec<u8>, Self::Error> {
        if secret_key.as_bytes().len() != BLS_SECRET_KEY_LENGTH {
            return Err(BLSError::InvalidSecretKeyLength(secret_key.as_bytes().len()));
        }
        let private_key = PrivateKey::from_bytes(secret_key.as_bytes())
            .map_err(BLSError::SecretKeyDeserialization)?;

        let pub_key_bytes = private_key.public_key().as_bytes();
        let signature = private_key.sign(Self::augment(&pub_key_bytes, msg));
        Ok(signature.as_bytes())
    }

    fn aggregate(&self, sigs: &[Vec<u8>]) -> Result<Vec<u8>, Self::Error> {
        if sigs.is_empty() {
            return Err(BLSError::EmptySignatures);
        }

        let mut typed_sigs = Vec::with_capacity(sigs.len());
        for sig in sigs {
            typed_sigs.push(self.checked_signature(sig)?);
        }

        let agg_sig = aggregate(&typed_sigs).map_err(BLSError::Aggregation)?;
        Ok(agg_sig.as_bytes())
    }

    fn aggregate_verify(
        &self,
        pub_keys: &[PubKey],
        msgs: &[&[u8]],
        sig: &[u8],
    ) -> Result<bool, Self::Error> {
        if pub_keys.is_empty() {
            return Err(BLSError::EmptyPublicKeys);
        }
        if pub_keys.len() != msgs.len() {
            return Err(BLSError::LengthMismatch {
                pub_keys: pub_keys.len(),
                msgs: msgs.len(),
            });
        }

        let mut typed_pub_keys = Vec::with_capacity(pub_keys.len());
        let mut augmented = Vec::with_capacity(msgs.len());
        for (pub_key, msg) in pub_keys.iter().zip(msgs) {
            typed_pub_keys.push(self.checked_pub_key(pub_key)?);
            augmented.push(Self::augment(&pub_key.0, msg));
        }
        let augmented_refs: Vec<&[u8]> = augmented.iter().map(Vec::as_slice).collect();

        let signature = self.checked_signature(sig)?;
        Ok(verify_messages(
            &signature,
            &augmented_refs,
            &typed_pub_keys,
        ))
    }

    fn verify(&self, pub_key: &PubKey, msg: &[u8], sig: &[u8]) -> Result<bool, Self::Error> {
        let typed_pub_key = self.checked_pub_key(pub_key)?;
        let signature = self.checked_signature(sig)?;

        let augmented = Self::augment(&pub_key.0, msg);
        Ok(verify_messages(
            &signature,
            &[augmented.as_slice()],
            &[typed_pub_key],
        ))
    }
}
