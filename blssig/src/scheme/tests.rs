// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{BLSAugScheme, BLSError};
use agsig_endorse::api::Scheme;
use agsig_endorse::{PubKey, SecretKey};
use bls_signatures::Serialize;
use rand::Rng;

fn seed(tag: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    seed
}

fn keypair(scheme: &BLSAugScheme, tag: u8) -> (SecretKey, PubKey) {
    scheme.key_gen(&seed(tag)).unwrap()
}

#[test]
fn test_key_gen_is_deterministic() {
    let scheme = BLSAugScheme::new();
    let (sk_a, pk_a) = keypair(&scheme, 1);
    let (sk_b, pk_b) = keypair(&scheme, 1);
    assert_eq!(sk_a, sk_b);
    assert_eq!(pk_a, pk_b);
}

#[test]
fn test_key_gen_distinct_seeds_give_distinct_keys() {
    let scheme = BLSAugScheme::new();
    let (sk1, pk1) = keypair(&scheme, 1);
    let (sk2, pk2) = keypair(&scheme, 2);
    assert_ne!(sk1, sk2);
    assert_ne!(pk1, pk2);
}

#[test]
fn test_key_gen_rejects_bad_seed_length() {
    let scheme = BLSAugScheme::new();
    assert!(matches!(
        scheme.key_gen(&[0u8; 16]),
        Err(BLSError::InvalidSeedLength(16))
    ));
    assert!(matches!(
        scheme.key_gen(&[]),
        Err(BLSError::InvalidSeedLength(0))
    ));
}

/// Verifies that a signature created by the scheme verifies under the same scheme
#[test]
fn test_single_signature_verification() {
    let scheme = BLSAugScheme::new();

    // Generate a key pair from fresh entropy and sign a message
    let mut seed = [0u8; 32];
    rand::thread_rng().fill(&mut seed);
    let (secret_key, pub_key) = scheme.key_gen(&seed).unwrap();
    let message = b"test message";
    let signature = scheme.sign(&secret_key, message).unwrap();

    assert!(scheme.verify(&pub_key, message, &signature).unwrap());
    assert!(!scheme.verify(&pub_key, b"other message", &signature).unwrap());
}

/// Verifies that corrupted signatures properly fail verification
#[test]
fn test_invalid_signature() {
    let scheme = BLSAugScheme::new();
    let (secret_key, pub_key) = keypair(&scheme, 7);
    let message = b"test message";
    let mut signature = scheme.sign(&secret_key, message).unwrap();

    // Corrupt the signature
    signature[0] ^= 0x01;

    // Either the point fails to decode or the pairing check fails
    match scheme.verify(&pub_key, message, &signature) {
        Ok(ok) => assert!(!ok, "corrupted signature should fail verification"),
        Err(BLSError::SignatureDeserialization(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
}

/// Two signers over two distinct messages combine into one aggregate that
/// verifies in matching pair order and fails with the messages swapped.
#[test]
fn test_aggregate_two_distinct_messages() {
    let scheme = BLSAugScheme::new();
    let (sk1, pk1) = keypair(&scheme, 1);
    let (sk2, pk2) = keypair(&scheme, 2);

    let msg1: &[u8] = &[1, 2, 3, 4, 5];
    let msg2: &[u8] = &[1, 2, 3, 4, 5, 6, 7];

    let sig1 = scheme.sign(&sk1, msg1).unwrap();
    let sig2 = scheme.sign(&sk2, msg2).unwrap();
    let agg_sig = scheme.aggregate(&[sig1, sig2]).unwrap();

    let pub_keys = [pk1, pk2];
    assert!(scheme.aggregate_verify(&pub_keys, &[msg1, msg2], &agg_sig).unwrap());

    // Swapping the messages between the keys breaks positional alignment
    assert!(!scheme.aggregate_verify(&pub_keys, &[msg2, msg1], &agg_sig).unwrap());
}

/// Aggregation input order does not affect what the aggregate verifies against
#[test]
fn test_aggregation_is_order_independent() {
    let scheme = BLSAugScheme::new();
    let (sk1, pk1) = keypair(&scheme, 1);
    let (sk2, pk2) = keypair(&scheme, 2);

    let msg1: &[u8] = &[1, 2, 3, 4, 5];
    let msg2: &[u8] = &[1, 2, 3, 4, 5, 6, 7];

    let sig1 = scheme.sign(&sk1, msg1).unwrap();
    let sig2 = scheme.sign(&sk2, msg2).unwrap();

    let agg_ab = scheme.aggregate(&[sig1.clone(), sig2.clone()]).unwrap();
    let agg_ba = scheme.aggregate(&[sig2, sig1]).unwrap();

    let pub_keys = [pk1, pk2];
    let msgs: [&[u8]; 2] = [msg1, msg2];
    assert!(scheme.aggregate_verify(&pub_keys, &msgs, &agg_ab).unwrap());
    assert!(scheme.aggregate_verify(&pub_keys, &msgs, &agg_ba).unwrap());
}

/// Re-verifying the same tuple yields the same boolean every time
#[test]
fn test_aggregate_verify_is_idempotent() {
    let scheme = BLSAugScheme::new();
    let (sk1, pk1) = keypair(&scheme, 1);
    let (sk2, pk2) = keypair(&scheme, 2);

    let msg1: &[u8] = &[1, 2, 3, 4, 5];
    let msg2: &[u8] = &[1, 2, 3, 4, 5, 6, 7];

    let sig1 = scheme.sign(&sk1, msg1).unwrap();
    let sig2 = scheme.sign(&sk2, msg2).unwrap();
    let agg_sig = scheme.aggregate(&[sig1, sig2]).unwrap();

    let pub_keys = [pk1, pk2];
    let msgs: [&[u8]; 2] = [msg1, msg2];
    for _ in 0..3 {
        assert!(scheme.aggregate_verify(&pub_keys, &msgs, &agg_sig).unwrap());
    }
    let swapped: [&[u8]; 2] = [msg2, msg1];
    for _ in 0..3 {
        assert!(!scheme.aggregate_verify(&pub_keys, &swapped, &agg_sig).unwrap());
    }
}

/// When one of four signers signed the wrong bytes, the aggregate check fails
/// and individual verification names exactly that signer.
#[test]
fn test_individual_checks_identify_wrong_message_signer() {
    let scheme = BLSAugScheme::new();
    let proposal = b"proposal payload";
    let keypairs: Vec<_> = (1..=4).map(|tag| keypair(&scheme, tag)).collect();

    let mut sigs = Vec::new();
    for (i, (secret_key, _)) in keypairs.iter().enumerate() {
        let msg: &[u8] = if i == 2 { b"something else" } else { proposal };
        sigs.push(scheme.sign(secret_key, msg).unwrap());
    }
    let agg_sig = scheme.aggregate(&sigs).unwrap();

    let pub_keys: Vec<PubKey> = keypairs.iter().map(|(_, pk)| pk.clone()).collect();
    let msgs: Vec<&[u8]> = vec![proposal; 4];
    assert!(!scheme.aggregate_verify(&pub_keys, &msgs, &agg_sig).unwrap());

    let verdicts: Vec<bool> = pub_keys
        .iter()
        .zip(&sigs)
        .map(|(pub_key, sig)| scheme.verify(pub_key, proposal, sig).unwrap())
        .collect();
    assert_eq!(verdicts, vec![true, true, false, true]);
}

#[test]
fn test_aggregate_rejects_empty_input() {
    let scheme = BLSAugScheme::new();
    assert!(matches!(
        scheme.aggregate(&[]),
        Err(BLSError::EmptySignatures)
    ));
}

/// An aggregate survives a serialize/deserialize round trip unchanged
#[test]
fn test_aggregate_serialization_roundtrip() {
    let scheme = BLSAugScheme::new();
    let (sk1, pk1) = keypair(&scheme, 1);
    let (sk2, pk2) = keypair(&scheme, 2);

    let msg1: &[u8] = &[1, 2, 3, 4, 5];
    let msg2: &[u8] = &[1, 2, 3, 4, 5, 6, 7];

    let sig1 = scheme.sign(&sk1, msg1).unwrap();
    let sig2 = scheme.sign(&sk2, msg2).unwrap();
    let agg_sig = scheme.aggregate(&[sig1, sig2]).unwrap();

    let decoded = bls_signatures::Signature::from_bytes(&agg_sig).unwrap();
    assert_eq!(decoded.as_bytes(), agg_sig);

    let pub_keys = [pk1, pk2];
    assert!(
        scheme
            .aggregate_verify(&pub_keys, &[msg1, msg2], &decoded.as_bytes())
            .unwrap()
    );
}

#[test]
fn test_length_validation() {
    let scheme = BLSAugScheme::new();
    let (secret_key, pub_key) = keypair(&scheme, 1);
    let signature = scheme.sign(&secret_key, b"msg").unwrap();

    let short_key = PubKey::new(vec![0u8; 10]);
    assert!(matches!(
        scheme.verify(&short_key, b"msg", &signature),
        Err(BLSError::InvalidPublicKeyLength(10))
    ));

    assert!(matches!(
        scheme.verify(&pub_key, b"msg", &[0u8; 12]),
        Err(BLSError::InvalidSignatureLength(12))
    ));

    assert!(matches!(
        scheme.aggregate_verify(&[], &[], &signature),
        Err(BLSError::EmptyPublicKeys)
    ));

    let msgs: [&[u8]; 2] = [b"a", b"b"];
    assert!(matches!(
        scheme.aggregate_verify(std::slice::from_ref(&pub_key), &msgs, &signature),
        Err(BLSError::LengthMismatch { pub_keys: 1, msgs: 2 })
    ));

    let bad_secret = SecretKey::new(vec![1u8; 5]);
    assert!(matches!(
        scheme.sign(&bad_secret, b"msg"),
        Err(BLSError::InvalidSecretKeyLength(5))
    ));
}
