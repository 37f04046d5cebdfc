// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{ActorId, EndorseError, Proposal};

/// A signature produced by one participant over one proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endorsement {
    /// The endorsing participant
    pub endorser: ActorId,
    /// Signature over the proposal bytes
    pub sig: Vec<u8>,
}

/// A single signature combining a fixed-order set of endorsements over the
/// same proposal.
///
/// Verifies against the parallel ordered list of (public key, proposal)
/// pairs, one pair per contributing endorser. The default value is the
/// distinguished empty sentinel and never verifies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EndorsementAggregate {
    /// Contributing endorsers, in aggregation order
    pub endorsers: Vec<ActorId>,
    /// The combined signature
    pub sig: Vec<u8>,
}

impl EndorsementAggregate {
    pub fn is_empty(&self) -> bool {
        self.endorsers.is_empty() || self.sig.is_empty()
    }
}

/// A proposal paired with its verified endorsement aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub proposal: Proposal,
    pub endorsement: EndorsementAggregate,
}

impl Transaction {
    /// Binds a proposal to its endorsement aggregate.
    ///
    /// A zero-cost join: the aggregate has already been verified by the
    /// collector and is not re-checked here. Only the empty sentinel is
    /// rejected.
    pub fn assemble(
        proposal: Proposal,
        endorsement: EndorsementAggregate,
    ) -> Result<Self, EndorseError> {
        if endorsement.is_empty() {
            return Err(EndorseError::EmptyAggregate);
        }
        Ok(Transaction {
            proposal,
            endorsement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_pairs_fields() {
        let proposal = Proposal::new(vec![1, 2, 3]);
        let endorsement = EndorsementAggregate {
            endorsers: vec![1, 2],
            sig: vec![9; 96],
        };

        let transaction = Transaction::assemble(proposal.clone(), endorsement.clone()).unwrap();
        assert_eq!(transaction.proposal, proposal);
        assert_eq!(transaction.endorsement, endorsement);
    }

    #[test]
    fn test_assemble_rejects_empty_sentinel() {
        let result = Transaction::assemble(
            Proposal::new(vec![1, 2, 3]),
            EndorsementAggregate::default(),
        );
        assert_eq!(result.unwrap_err(), EndorseError::EmptyAggregate);

        // A signature with no recorded endorsers is equally unusable.
        let result = Transaction::assemble(
            Proposal::new(vec![1, 2, 3]),
            EndorsementAggregate {
                endorsers: vec![],
                sig: vec![9; 96],
            },
        );
        assert_eq!(result.unwrap_err(), EndorseError::EmptyAggregate);
    }
}
