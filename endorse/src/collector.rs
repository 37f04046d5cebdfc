// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::api::Scheme;
use crate::{Endorsement, EndorseError, EndorsementAggregate, Identity, Proposal, PubKey};
use tracing::{error, warn};

/// Gathers per-endorser signatures over one proposal and validates them.
///
/// The expected path is one aggregate pairing check regardless of endorser
/// count; individual endorsements are only re-checked when that fails, to
/// name the culprit.
pub struct EndorsementCollector<'s, S> {
    scheme: &'s S,
}

impl<'s, S: Scheme> EndorsementCollector<'s, S>
where
    S::Error: std::fmt::Display,
{
    pub fn new(scheme: &'s S) -> Self {
        EndorsementCollector { scheme }
    }

    /// Collects endorsements from every identity in caller order and returns
    /// their verified aggregate.
    ///
    /// The caller-supplied order is the aggregation order; verifiers must be
    /// handed the same order, which is why the aggregate records its
    /// endorsers. The proposal is never mutated.
    ///
    /// # Errors
    /// * [`EndorseError::NoEndorsers`] on an empty endorser slice
    /// * [`EndorseError::EndorsementFailed`] naming the first endorser whose
    ///   individual signature does not verify
    /// * [`EndorseError::AggregationInconsistent`] when every individual
    ///   endorsement verifies but the aggregate does not
    pub fn collect(
        &self,
        proposal: &Proposal,
        endorsers: &[Identity],
    ) -> Result<EndorsementAggregate, EndorseError> {
        if endorsers.is_empty() {
            return Err(EndorseError::NoEndorsers);
        }

        let mut endorsements = Vec::with_capacity(endorsers.len());
        for endorser in endorsers {
            let sig = endorser
                .sign(self.scheme, proposal.as_bytes())
                .map_err(EndorseError::scheme)?;
            endorsements.push(Endorsement {
                endorser: endorser.id(),
                sig,
            });
        }

        let sigs: Vec<Vec<u8>> = endorsements.iter().map(|e| e.sig.clone()).collect();
        let agg_sig = self.scheme.aggregate(&sigs).map_err(EndorseError::scheme)?;

        // Hot path: one aggregate check over the parallel (key, proposal) vectors.
        let pub_keys: Vec<PubKey> = endorsers.iter().map(|e| e.pub_key().clone()).collect();
        let msgs: Vec<&[u8]> = vec![proposal.as_bytes(); endorsers.len()];
        let ok = self
            .scheme
            .aggregate_verify(&pub_keys, &msgs, &agg_sig)
            .map_err(EndorseError::scheme)?;
        if ok {
            return Ok(EndorsementAggregate {
                endorsers: endorsements.into_iter().map(|e| e.endorser).collect(),
                sig: agg_sig,
            });
        }

        // Cold path: check each endorsement in the same order to name the culprit.
        warn!(
            endorsers = endorsers.len(),
            "aggregate endorsement check failed, falling back to per-endorser verification"
        );
        for (endorser, endorsement) in endorsers.iter().zip(&endorsements) {
            let ok = self
                .scheme
                .verify(endorser.pub_key(), proposal.as_bytes(), &endorsement.sig)
                .map_err(EndorseError::scheme)?;
            if !ok {
                return Err(EndorseError::EndorsementFailed {
                    endorser: endorsement.endorser,
                });
            }
        }

        // Every endorsement checks out individually, so the aggregation step
        // itself (or its ordering) is wrong. Distinct from a bad endorsement.
        error!(
            endorsers = endorsers.len(),
            "every individual endorsement verifies but their aggregate does not"
        );
        Err(EndorseError::AggregationInconsistent)
    }
}
