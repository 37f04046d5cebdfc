// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::ActorId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EndorseError {
    /// Error when a collection is requested with no endorsers.
    #[error("no endorsers supplied for collection")]
    NoEndorsers,

    /// Error when exactly one endorsement fails individual verification.
    ///
    /// The caller decides whether to retry collection without the named
    /// endorser or to abort the proposal.
    #[error("endorsement by participant {endorser} failed verification")]
    EndorsementFailed { endorser: ActorId },

    /// Error when every individual endorsement verifies but the aggregate
    /// does not. Indicates a bug in aggregation or ordering, never expected
    /// in correct operation.
    #[error("every individual endorsement verifies but their aggregate does not")]
    AggregationInconsistent,

    /// Error when a transaction is assembled from the empty aggregate sentinel.
    #[error("empty endorsement aggregate")]
    EmptyAggregate,

    /// Error when a roster contains the same participant twice.
    #[error("duplicate participant {0} in roster")]
    DuplicateParticipant(ActorId),

    /// Error from the underlying signature scheme.
    #[error("signature scheme error: {0}")]
    Scheme(String),
}

impl EndorseError {
    pub(crate) fn scheme<E: std::fmt::Display>(err: E) -> Self {
        EndorseError::Scheme(err.to_string())
    }
}
