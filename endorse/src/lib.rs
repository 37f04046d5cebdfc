// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Endorsement aggregation protocol core.
//!
//! This module provides the core structures and logic for a multi-party
//! transaction-endorsement workflow built on aggregate signatures, including:
//! - Participant identities and the roster mapping participants to public keys
//! - Endorsement collection with a cheap aggregate check and a per-endorser fallback
//! - Transaction assembly binding a proposal to its verified endorsement aggregate
//! - The [`api::Scheme`] seam behind which the signature cryptography lives
//!
//! Key components:
//! - [`Identity`]: A participant holding a signing key pair
//! - [`EndorsementCollector`]: Gathers and validates endorsements over one proposal
//! - [`EndorsementAggregate`]: A single signature combining many endorsements
//! - [`Transaction`]: A proposal paired with its endorsement aggregate
//! - [`Roster`]: Resolves participant ids to public keys at verification time
//!
//! Block batching and peer-side verification build on these types in the
//! `agsig-blocks` crate; the concrete BLS scheme lives in `agsig-blssig`.

pub mod api;
mod collector;
mod error;
mod identity;
mod roster;
mod transaction;
mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use collector::EndorsementCollector;
pub use error::EndorseError;
pub use identity::{Identity, SecretKey};
pub use roster::{Roster, RosterEntry};
pub use transaction::{Endorsement, EndorsementAggregate, Transaction};
pub use types::{ActorId, Proposal, PubKey};
