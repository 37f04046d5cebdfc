//! # Example: endorsement pipeline
//!
//! Demonstrates the full endorsement workflow: four endorsers sign two
//! transaction proposals, a client aggregates and verifies the endorsements,
//! the orderer batches both transactions into one block under a single
//! hierarchical aggregate signature, and a peer re-verifies the block with
//! one pairing check.
//!
//! ## Usage:
//! ```bash
//! cargo run --example endorsement_pipeline
//! ```
//!
use agsig_blssig::BLSAugScheme;
use agsig_endorse::{EndorsementCollector, Identity, Proposal, Roster, Transaction};
use agsig_blocks::{BlockAssembler, PeerVerifier};
use anyhow::Result;

/// Proposal payload size, roughly what a serialized transaction with its
/// policy configuration would occupy.
const PROPOSAL_SIZE: usize = 5000;

fn main() -> Result<()> {
    println!("endorsement pipeline example");

    let scheme = BLSAugScheme::new();

    // Key generation, one time only during setup. Public keys would be
    // distributed through a PKI; here the roster plays that role.
    let endorsers: Vec<Identity> = (1u8..=4)
        .map(|tag| Identity::from_seed(&scheme, u64::from(tag), &seed(tag)))
        .collect::<Result<_, _>>()?;
    let orderer = Identity::from_seed(&scheme, 100, &seed(9))?;
    let roster = Roster::from_identities(&endorsers)?;
    println!("setup: {} endorsers + 1 orderer", roster.len());

    // Two pending proposals, e.g. opposite transfers between two banks
    let proposal_1 = Proposal::new(payload(0x11));
    let proposal_2 = Proposal::new(payload(0x22));

    // Each client collects endorsements over its own proposal. The aggregate
    // check is one pairing regardless of endorser count; individual
    // endorsements are only inspected if it fails.
    let collector = EndorsementCollector::new(&scheme);
    let mut transactions = Vec::new();
    for (i, proposal) in [proposal_1, proposal_2].into_iter().enumerate() {
        let aggregate = collector.collect(&proposal, &endorsers)?;
        println!(
            "transaction {}: endorsement aggregate over {} endorsers verified",
            i,
            aggregate.endorsers.len()
        );
        transactions.push(Transaction::assemble(proposal, aggregate)?);
    }

    // The orderer re-checks every aggregate, seals the batch under its own
    // signature and combines everything into one block signature.
    let block = BlockAssembler::new(&scheme).assemble(&transactions, &orderer, &roster)?;
    println!(
        "block: {} transactions, {} payload bytes, sealed by orderer {}",
        block.entries.len(),
        block.payload.len(),
        block.orderer,
    );

    // Peer verification, run by each peer before accepting the block
    let verdict = PeerVerifier::new(&scheme).verify(&block, orderer.pub_key(), &roster)?;
    println!("peer verification: {}", verdict);
    anyhow::ensure!(verdict, "peer rejected a well-formed block");

    Ok(())
}

fn seed(tag: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    seed
}

/// Deterministic pseudo-random payload bytes (xorshift), so the example needs
/// no entropy source.
fn payload(tag: u8) -> Vec<u8> {
    let mut state = u64::from(tag) << 8 | 0x9e;
    let mut bytes = Vec::with_capacity(PROPOSAL_SIZE);
    while bytes.len() < PROPOSAL_SIZE {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        bytes.extend_from_slice(&state.to_le_bytes());
    }
    bytes.truncate(PROPOSAL_SIZE);
    bytes
}
