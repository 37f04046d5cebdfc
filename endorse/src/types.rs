// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// `ActorId` represents the unique identifier for a participant in the endorsement network.
pub type ActorId = u64;

/// `PubKey` represents a serialized public key used for signature verification.
///
/// The byte layout is defined by the wrapped signature scheme and is opaque here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PubKey(pub Vec<u8>);

impl PubKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        PubKey(bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// `Proposal` is the opaque byte payload of a pending transaction.
///
/// The payload is assumed to already encode any policy or configuration;
/// it is never interpreted, only signed and concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal(Vec<u8>);

impl Proposal {
    pub fn new(bytes: Vec<u8>) -> Self {
        Proposal(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
