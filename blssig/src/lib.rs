// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! BLS signature scheme implementation for the endorsement workflow.
//!
//! This module implements the [`agsig_endorse::api::Scheme`] capability over
//! the external `bls-signatures` library. It uses the BLS12_381 curve with G1
//! for public keys and G2 for signatures. Messages are augmented with the
//! signer's public key before hashing (the "aug" scheme), so that many
//! endorsers signing the same proposal still sign distinct effective
//! messages.

mod scheme;

pub use scheme::{BLSAugScheme, BLSError};
