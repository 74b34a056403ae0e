use std::collections::HashSet;
use std::sync::Arc;

use objectid::{
    bytes, GeneratorConfig, GeneratorContext, InstanceTag, ObjectId, ObjectIdInput,
    COUNTER_MODULUS,
};
use proptest::prelude::*;

fn context_with_seed(seed: u32) -> GeneratorContext {
    GeneratorContext::new(GeneratorConfig {
        cache_hex_string: false,
        instance_tag: Some(InstanceTag::from_bytes([9, 8, 7, 6, 5])),
        counter_seed: Some(seed),
    })
}

proptest! {
    #[test]
    fn hex_string_parses_to_lowercase(s in "[0-9a-fA-F]{24}") {
        let id = ObjectId::parse_str(&s).unwrap();
        prop_assert_eq!(id.to_hex_string(), s.to_lowercase());
    }

    #[test]
    fn hex_form_reconstructs_id(raw in any::<[u8; 12]>()) {
        let id = ObjectId::from_bytes(raw);
        let parsed = ObjectId::create_from_hex_string(&id.to_hex_string()).unwrap();
        prop_assert_eq!(parsed.as_bytes(), &raw);
    }

    #[test]
    fn sequential_ids_advance_counter(seed in 0u32..COUNTER_MODULUS, time in any::<u32>()) {
        let ctx = context_with_seed(seed);
        let a = ObjectId::create_in(&ctx, ObjectIdInput::Generate(Some(time))).unwrap();
        let b = ObjectId::create_in(&ctx, ObjectIdInput::Generate(Some(time))).unwrap();

        prop_assert_eq!(a.timestamp_secs(), b.timestamp_secs());
        prop_assert_eq!(b.counter(), (a.counter() + 1) % COUNTER_MODULUS);
        prop_assert_ne!(a, b);
    }

    #[test]
    fn wrong_length_strings_are_invalid(s in "[0-9a-f]{0,40}") {
        prop_assume!(s.len() != 12 && s.len() != 24);
        prop_assert!(!ObjectId::is_valid_str(&s));
    }

    #[test]
    fn wrong_length_buffers_are_invalid(raw in proptest::collection::vec(any::<u8>(), 0..32)) {
        prop_assert_eq!(ObjectId::is_valid_bytes(&raw), raw.len() == 12);
    }

    #[test]
    fn from_hex_decodes_even_prefix(s in "[0-9a-f]{0,30}") {
        let decoded = bytes::from_hex(&s);
        prop_assert_eq!(decoded.len(), s.len() / 2);
        prop_assert_eq!(bytes::to_hex(&decoded), &s[..s.len() - s.len() % 2]);
    }

    #[test]
    fn timestamp_matches_create_from_time(time in any::<u32>()) {
        let id = ObjectId::create_from_time(time);
        prop_assert_eq!(id.timestamp().timestamp(), i64::from(time));
    }

    #[test]
    fn equals_is_reflexive(raw in any::<[u8; 12]>()) {
        let id = ObjectId::from_bytes(raw);
        prop_assert!(id.equals(&id));
        prop_assert!(id.equals(id.to_hex_string().as_str()));
    }
}

#[test]
fn documented_examples_hold() {
    assert!(ObjectId::is_valid_str("507f1f77bcf86cd799439011"));
    assert!(!ObjectId::is_valid_str("507f1f77bcf86cd79943901"));
    assert!(!ObjectId::is_valid_str("zzzzzzzzzzzzzzzzzzzzzzzz"));
    assert!(ObjectId::is_valid_bytes(ObjectId::new().as_bytes()));
    assert!(!ObjectId::is_valid_bytes(&[0u8; 10]));
    assert_eq!(bytes::from_hex("abc"), vec![0xab]);

    let id = ObjectId::create_from_time(1_700_000_000);
    assert_eq!(id.timestamp().to_rfc3339(), "2023-11-14T22:13:20+00:00");
}

#[test]
fn concurrent_generation_is_unique() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 5_000;

    let ctx = Arc::new(GeneratorContext::default());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            std::thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| ObjectId::create_in(&ctx, ObjectIdInput::Generate(Some(1_700_000_000))).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    let mut tags = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            tags.insert(id.instance_tag());
            assert!(seen.insert(id), "duplicate ObjectId generated");
        }
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
    assert_eq!(tags.len(), 1);
}

#[test]
fn global_generation_is_unique() {
    let ids: HashSet<_> = (0..1_000).map(|_| ObjectId::new()).collect();
    assert_eq!(ids.len(), 1_000);
}
