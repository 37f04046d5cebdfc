// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{PubKey, SecretKey};

/// Scheme trait for the signature capability used by the endorsement protocol.
///
/// All cryptography (key generation, signing, aggregation, pairing checks)
/// lives behind this trait; the protocol core never touches curve arithmetic.
/// Implementations are passed explicitly to each component constructor, which
/// keeps the scheme swappable for test doubles.
pub trait Scheme {
    /// Error type. Once there is a concrete implementation of the `Scheme` trait,
    /// this might just be a concrete error type.
    type Error;

    /// Derives a signing key pair from a seed
    ///
    /// Must be deterministic for identical seed bytes. Fails on a malformed
    /// seed length.
    fn key_gen(&self, seed: &[u8]) -> Result<(SecretKey, PubKey), Self::Error>;

    /// Signs a message with the given secret key
    ///
    /// Pure function of `(secret_key, msg)`; no side effects.
    fn sign(&self, secret_key: &SecretKey, msg: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Combines signatures non-interactively into a single signature
    ///
    /// Inputs may themselves be aggregates. The combination is commutative
    /// over the underlying group, but callers must keep one (public key,
    /// message) ordering convention for later verification. Fails on empty
    /// input.
    ///
    /// # Arguments
    /// * `sigs` - The signatures to aggregate
    fn aggregate(&self, sigs: &[Vec<u8>]) -> Result<Vec<u8>, Self::Error>;

    /// Verifies an aggregate signature against positional (public key, message) pairs
    ///
    /// This method must be safe for concurrent use.
    ///
    /// Returns `Ok(false)` on a signature mismatch; `Err` is reserved for
    /// structural problems such as undecodable bytes or a length mismatch
    /// between `pub_keys` and `msgs`.
    ///
    /// # Arguments
    /// * `pub_keys` - The public keys of the signers, one per message
    /// * `msgs` - The messages that were signed, at matching indices
    /// * `sig` - The aggregate signature to verify
    fn aggregate_verify(
        &self,
        pub_keys: &[PubKey],
        msgs: &[&[u8]],
        sig: &[u8],
    ) -> Result<bool, Self::Error>;

    /// Verifies a single signature for the given public key
    ///
    /// This method must be safe for concurrent use. Only needed on the
    /// diagnostic fallback path.
    ///
    /// # Arguments
    /// * `pub_key` - The public key to verify against
    /// * `msg` - The message that was signed
    /// * `sig` - The signature to verify
    fn verify(&self, pub_key: &PubKey, msg: &[u8], sig: &[u8]) -> Result<bool, Self::Error>;
}
