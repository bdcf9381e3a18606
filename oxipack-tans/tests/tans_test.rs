//! tANS integration tests.

use oxipack_tans::{
    FrequencyTable, OxiPackError, Outcome, TansConfig, TansTable, Unsuitable, decode, encode,
    normalize,
};
use proptest::prelude::*;

/// Text drawn from a small alphabet with a fixed LCG.
fn small_alphabet_text(len: usize, seed: u64) -> Vec<u8> {
    let alphabet = b"etaoin shrdlu";
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            alphabet[((state >> 33) % alphabet.len() as u64) as usize]
        })
        .collect()
}

#[test]
fn test_roundtrip_compresses_small_alphabet() {
    let data = small_alphabet_text(100_000, 1);
    let stream = encode(&data, &TansConfig::DEFAULT)
        .unwrap()
        .complete()
        .expect("suitable input");

    assert_eq!(stream.table_size, 1 << 17);
    // 13 symbols over 2^17 states: about 14 bits of digit per symbol at worst,
    // but frequent symbols use fewer nibbles than a full byte-and-a-half.
    assert!(stream.digits.len() < data.len() * 2);

    let decoded = decode(&stream).unwrap();
    assert_eq!(decoded, Outcome::Complete(data));
}

#[test]
fn test_skewed_input_is_unsuitable() {
    let mut data = vec![b'a'; 99];
    data.push(b'b');
    match encode(&data, &TansConfig::DEFAULT).unwrap() {
        Outcome::Unsuitable(Unsuitable::TooSkewed { symbol, .. }) => assert_eq!(symbol, b'a'),
        other => panic!("expected skew rejection, got {other:?}"),
    }
}

#[test]
fn test_table_cap() {
    let data = small_alphabet_text((1 << 20) + 1, 3);
    let outcome = encode(&data, &TansConfig::DEFAULT).unwrap();
    assert_eq!(
        outcome,
        Outcome::Unsuitable(Unsuitable::TableTooLarge {
            table_size: 1 << 21,
            max: 1 << 20
        })
    );

    // Exactly 2^20 symbols still fits.
    let data = small_alphabet_text(1 << 20, 3);
    assert!(encode(&data, &TansConfig::DEFAULT).unwrap().is_complete());
}

#[test]
fn test_two_symbols_minimum() {
    let stream = encode(b"ab", &TansConfig::DEFAULT).unwrap().complete().unwrap();
    assert_eq!(stream.table_size, 2);
    assert_eq!(
        decode(&stream).unwrap(),
        Outcome::Complete(b"ab".to_vec())
    );
}

#[test]
fn test_corrupted_final_state() {
    let data = small_alphabet_text(1000, 5);
    let mut stream = encode(&data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
    stream.final_state = stream.table_size;
    let err = decode(&stream).unwrap_err();
    assert!(matches!(err, OxiPackError::InvalidState { index: 0, .. }));
}

#[test]
fn test_corrupted_digits_detected() {
    let data = small_alphabet_text(1000, 9);
    let mut stream = encode(&data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
    let mid = stream.digits.len() / 2;
    stream.digits[mid] ^= 0xFF;
    // A flipped digit either trips a range check or lands in a different
    // end state; it never decodes silently to the original.
    match decode(&stream) {
        Ok(Outcome::Complete(decoded)) => assert_ne!(decoded, data),
        Ok(other) => panic!("unexpected outcome {other:?}"),
        Err(_) => {}
    }
}

#[test]
fn test_table_layout_matches_normalized() {
    let data = small_alphabet_text(5000, 11);
    let freqs = FrequencyTable::from_data(&data);
    let table_size = freqs.implied_table_size() as u32;
    let table = TansTable::new(&freqs, table_size).unwrap();

    let mut expected_start = 0;
    for (symbol, _) in freqs.records() {
        assert_eq!(table.start(symbol), expected_start);
        let f = table.normalized(symbol);
        assert_eq!(table.symbol_at(expected_start), Some(symbol));
        assert_eq!(table.symbol_at(expected_start + f - 1), Some(symbol));
        expected_start += f;
    }
    assert_eq!(expected_start, table_size);
}

proptest! {
    #[test]
    fn prop_normalized_sum(counts in prop::collection::vec(1u32..10_000, 1..256)) {
        let freqs = FrequencyTable::from_records(
            counts.iter().enumerate().map(|(s, &c)| (s as u8, c)),
        ).unwrap();
        let table_size = freqs.implied_table_size() as u32;
        let normalized = normalize(&freqs, table_size).unwrap();
        prop_assert_eq!(normalized.iter().sum::<u32>(), table_size);
        for (symbol, _) in freqs.records() {
            prop_assert!(normalized[symbol as usize] >= 1);
        }
    }

    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        match encode(&data, &TansConfig::DEFAULT).unwrap() {
            Outcome::Complete(stream) => {
                prop_assert_eq!(
                    decode(&stream).unwrap(),
                    Outcome::Complete(data)
                );
            }
            Outcome::Unsuitable(_) => {
                let freqs = FrequencyTable::from_data(&data);
                prop_assert!(TansConfig::DEFAULT.assess(&freqs).is_err());
            }
        }
    }

    #[test]
    fn prop_roundtrip_skewed(data in prop::collection::vec(prop_oneof![8 => Just(0u8), 1 => 1u8..4], 2..2048)) {
        if let Outcome::Complete(stream) = encode(&data, &TansConfig::DEFAULT).unwrap() {
            prop_assert_eq!(
                decode(&stream).unwrap(),
                Outcome::Complete(data)
            );
        }
    }
}
