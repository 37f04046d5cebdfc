// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use agsig_endorse::ActorId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BlockError {
    /// Error when block assembly is requested with no transactions.
    #[error("no transactions supplied for block assembly")]
    EmptyBatch,

    /// Error when a transaction's endorsement aggregate fails the
    /// pre-inclusion check. The whole batch is aborted, never partially
    /// included.
    #[error("transaction {index} carries an invalid endorsement aggregate")]
    InvalidTransaction { index: usize },

    /// Error when a recorded endorser has no roster entry.
    #[error("endorser {endorser} is not in the roster")]
    UnknownEndorser { endorser: ActorId },

    /// Error when the recorded proposal lengths don't slice the payload exactly.
    #[error("recorded proposal lengths need {expected} payload bytes, block carries {actual}")]
    PayloadBoundsMismatch { expected: usize, actual: usize },

    /// Error from the underlying signature scheme.
    #[error("signature scheme error: {0}")]
    Scheme(String),
}

impl BlockError {
    pub(crate) fn scheme<E: std::fmt::Display>(err: E) -> Self {
        BlockError::Scheme(err.to_string())
    }
}
