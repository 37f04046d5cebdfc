// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::api::Scheme;
use crate::{ActorId, PubKey};
use std::fmt;

/// `SecretKey` holds a serialized signing key.
///
/// The byte layout is defined by the wrapped signature scheme. The key is
/// exclusively owned by its [`Identity`] and never leaves it; `Debug` output
/// is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        SecretKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([redacted])")
    }
}

/// A protocol participant holding a signing key pair.
///
/// Created once at setup from a random seed and immutable thereafter.
/// Whether an identity acts as an endorser or an orderer is decided by how
/// it is used, not by its type.
#[derive(Debug, Clone)]
pub struct Identity {
    id: ActorId,
    secret_key: SecretKey,
    pub_key: PubKey,
}

impl Identity {
    /// Derives an identity from seed bytes via the scheme's key generation.
    ///
    /// Key generation errors (e.g. a malformed seed length) are propagated,
    /// never discarded.
    pub fn from_seed<S: Scheme>(scheme: &S, id: ActorId, seed: &[u8]) -> Result<Self, S::Error> {
        let (secret_key, pub_key) = scheme.key_gen(seed)?;
        Ok(Identity {
            id,
            secret_key,
            pub_key,
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn pub_key(&self) -> &PubKey {
        &self.pub_key
    }

    /// Signs a message with this identity's secret key.
    pub fn sign<S: Scheme>(&self, scheme: &S, msg: &[u8]) -> Result<Vec<u8>, S::Error> {
        scheme.sign(&self.secret_key, msg)
    }
}
