use proptest::prelude::*;

use alloy_primitives::U256;
use quill_rlp::{encode_bytes, encode_list, encode_uint, RlpValue};

proptest! {
    #[test]
    fn byte_strings_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut encoded = Vec::new();
        encode_bytes(&data, &mut encoded);
        let decoded = RlpValue::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes().unwrap(), data.as_slice());
    }

    #[test]
    fn string_lists_roundtrip(items in proptest::collection::vec(
        proptest::collection::vec(any::<u8>(), 0..64), 0..16,
    )) {
        let mut encoded = Vec::new();
        encode_list(&mut encoded, |payload| {
            for item in &items {
                encode_bytes(item, payload);
            }
        });

        let decoded = RlpValue::decode(&encoded).unwrap();
        let list = decoded.as_list().unwrap();
        prop_assert_eq!(list.len(), items.len());
        for (value, item) in list.iter().zip(&items) {
            prop_assert_eq!(value.as_bytes().unwrap(), item.as_slice());
        }
    }

    #[test]
    fn uints_roundtrip(raw in any::<[u8; 32]>()) {
        let value = U256::from_be_bytes(raw);
        let mut encoded = Vec::new();
        encode_uint(value, &mut encoded);
        let decoded = RlpValue::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_uint().unwrap(), value);
    }

    #[test]
    fn decoded_input_reencodes_identically(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        // Whatever the decoder accepts must be the canonical form.
        if let Ok(value) = RlpValue::decode(&data) {
            prop_assert_eq!(value.encode(), data);
        }
    }

    #[test]
    fn decoder_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = RlpValue::decode(&data);
    }
}
