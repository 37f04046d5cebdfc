// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// The `blocks` package provides block assembly and peer-side verification for
/// the endorsement workflow.
///
/// This package includes:
/// - The [`Block`] structure batching endorsed transactions under one signature
/// - The [`BlockAssembler`] run by the orderer
/// - The [`PeerVerifier`] run by every peer before accepting a block
///
/// The orderer concatenates the batched proposals into one payload, signs it,
/// and hierarchically aggregates its own signature with every transaction's
/// endorsement aggregate into a single block signature. A peer then re-derives
/// the exact (public key, message) pair list used at assembly time and checks
/// the block signature with one aggregate verification.
///
/// Note: the peer check is all-or-nothing. A failing block is rejected whole;
/// drilling down to a single bad endorsement happens at collection time only,
/// so peers never pay per-endorser pairing work in the steady state.
mod error;

pub use error::BlockError;

use agsig_endorse::api::Scheme;
use agsig_endorse::{ActorId, Identity, PubKey, Roster, Transaction};
use tracing::error;

/// Per-transaction endorsement record carried in a block.
///
/// The proposal bytes themselves live in the block payload; the record keeps
/// only the byte length, so verifiers slice the payload by recorded lengths
/// rather than trusting a second copy of the proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    /// Contributing endorsers, in aggregation order
    pub endorsers: Vec<ActorId>,
    /// The transaction's endorsement aggregate
    pub sig: Vec<u8>,
    /// Length of the transaction's proposal within the payload
    pub proposal_len: usize,
}

/// An ordered batch of endorsed transactions sealed by the orderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// One record per transaction, in block order
    pub entries: Vec<BlockEntry>,
    /// Concatenation of every transaction's proposal, order-preserving
    pub payload: Vec<u8>,
    /// The orderer that sealed this block
    pub orderer: ActorId,
    /// The orderer's signature over the full payload
    pub orderer_sig: Vec<u8>,
    /// Block signature: aggregate of the orderer signature and every
    /// transaction's endorsement aggregate
    pub sig: Vec<u8>,
}

impl Block {
    /// Slices the payload back into per-transaction proposals by the recorded
    /// lengths. Never splits on content.
    fn proposal_slices(&self) -> Result<Vec<&[u8]>, BlockError> {
        let expected: usize = self.entries.iter().map(|e| e.proposal_len).sum();
        if expected != self.payload.len() {
            return Err(BlockError::PayloadBoundsMismatch {
                expected,
                actual: self.payload.len(),
            });
        }

        let mut slices = Vec::with_capacity(self.entries.len());
        let mut offset = 0;
        for entry in &self.entries {
            slices.push(&self.payload[offset..offset + entry.proposal_len]);
            offset += entry.proposal_len;
        }
        Ok(slices)
    }
}

fn endorser_keys(roster: &Roster, endorsers: &[ActorId]) -> Result<Vec<PubKey>, BlockError> {
    endorsers
        .iter()
        .map(|&endorser| {
            roster
                .pub_key(endorser)
                .cloned()
                .ok_or(BlockError::UnknownEndorser { endorser })
        })
        .collect()
}

/// Batches endorsed transactions into a signed block.
pub struct BlockAssembler<'s, S> {
    scheme: &'s S,
}

impl<'s, S: Scheme> BlockAssembler<'s, S>
where
    S::Error: std::fmt::Display,
{
    pub fn new(scheme: &'s S) -> Self {
        BlockAssembler { scheme }
    }

    /// Assembles a block from endorsed transactions, in batch order.
    ///
    /// Every transaction's endorsement aggregate is re-checked before
    /// inclusion; one extra pairing check per transaction buys a precise
    /// culprit before the combination step instead of a doomed block. On the
    /// first failure the whole batch is aborted: transactions within a block
    /// may carry ordering expectations between each other, so none are
    /// silently dropped.
    pub fn assemble(
        &self,
        transactions: &[Transaction],
        orderer: &Identity,
        roster: &Roster,
    ) -> Result<Block, BlockError> {
        if transactions.is_empty() {
            return Err(BlockError::EmptyBatch);
        }

        for (index, transaction) in transactions.iter().enumerate() {
            if !self.verify_transaction(transaction, roster)? {
                error!(
                    index,
                    "transaction endorsement aggregate failed pre-inclusion check"
                );
                return Err(BlockError::InvalidTransaction { index });
            }
        }

        let payload_len = transactions.iter().map(|t| t.proposal.len()).sum();
        let mut payload = Vec::with_capacity(payload_len);
        let mut entries = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            payload.extend_from_slice(transaction.proposal.as_bytes());
            entries.push(BlockEntry {
                endorsers: transaction.endorsement.endorsers.clone(),
                sig: transaction.endorsement.sig.clone(),
                proposal_len: transaction.proposal.len(),
            });
        }

        let orderer_sig = orderer
            .sign(self.scheme, &payload)
            .map_err(BlockError::scheme)?;

        // Hierarchical step: the per-transaction aggregates combine with the
        // orderer signature without any knowledge of how many endorsements
        // each of them folds in. Orderer first, the same convention the
        // verifier uses for its pair list.
        let mut sigs = Vec::with_capacity(entries.len() + 1);
        sigs.push(orderer_sig.clone());
        sigs.extend(entries.iter().map(|entry| entry.sig.clone()));
        let sig = self.scheme.aggregate(&sigs).map_err(BlockError::scheme)?;

        Ok(Block {
            entries,
            payload,
            orderer: orderer.id(),
            orderer_sig,
            sig,
        })
    }

    fn verify_transaction(
        &self,
        transaction: &Transaction,
        roster: &Roster,
    ) -> Result<bool, BlockError> {
        let pub_keys = endorser_keys(roster, &transaction.endorsement.endorsers)?;
        let msgs: Vec<&[u8]> = vec![transaction.proposal.as_bytes(); pub_keys.len()];
        self.scheme
            .aggregate_verify(&pub_keys, &msgs, &transaction.endorsement.sig)
            .map_err(BlockError::scheme)
    }
}

/// Re-verifies a sealed block in a single aggregate check.
pub struct PeerVerifier<'s, S> {
    scheme: &'s S,
}

impl<'s, S: Scheme> PeerVerifier<'s, S>
where
    S::Error: std::fmt::Display,
{
    pub fn new(scheme: &'s S) -> Self {
        PeerVerifier { scheme }
    }

    /// Checks the block signature against the reconstructed pair list:
    /// (orderer key, full payload) followed, per transaction in block order,
    /// by one (endorser key, proposal slice) pair per contributing endorser.
    ///
    /// Returns the verification verdict; a `false` block must be rejected
    /// whole by the caller. Structural defects (unknown endorsers, payload
    /// bounds that don't match the recorded lengths) surface as errors.
    pub fn verify(
        &self,
        block: &Block,
        orderer_pk: &PubKey,
        roster: &Roster,
    ) -> Result<bool, BlockError> {
        let slices = block.proposal_slices()?;

        let signers = 1 + block
            .entries
            .iter()
            .map(|entry| entry.endorsers.len())
            .sum::<usize>();
        let mut pub_keys = Vec::with_capacity(signers);
        let mut msgs: Vec<&[u8]> = Vec::with_capacity(signers);
        pub_keys.push(orderer_pk.clone());
        msgs.push(block.payload.as_slice());
        for (entry, slice) in block.entries.iter().zip(&slices) {
            pub_keys.extend(endorser_keys(roster, &entry.endorsers)?);
            msgs.extend(std::iter::repeat_n(*slice, entry.endorsers.len()));
        }

        self.scheme
            .aggregate_verify(&pub_keys, &msgs, &block.sig)
            .map_err(BlockError::scheme)
    }
}
