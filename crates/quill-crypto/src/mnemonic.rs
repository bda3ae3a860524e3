//! BIP-39 mnemonic handling.
//!
//! Entropy sizes of 128–256 bits map to phrases of 12–24 English words;
//! the trailing checksum bits come from SHA-256 of the entropy. Seeds are
//! stretched with PBKDF2-HMAC-SHA512 (2048 iterations, salt
//! `"mnemonic" ‖ passphrase`).

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptoError;

/// Phrase lengths accepted by BIP-39.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl WordCount {
    /// Bytes of entropy backing a phrase of this length.
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Words12 => 16,
            WordCount::Words15 => 20,
            WordCount::Words18 => 24,
            WordCount::Words21 => 28,
            WordCount::Words24 => 32,
        }
    }

    pub const fn words(self) -> usize {
        match self {
            WordCount::Words12 => 12,
            WordCount::Words15 => 15,
            WordCount::Words18 => 18,
            WordCount::Words21 => 21,
            WordCount::Words24 => 24,
        }
    }
}

/// Generates a fresh mnemonic from OS randomness.
pub fn generate_mnemonic(count: WordCount) -> Result<String, CryptoError> {
    let mut entropy = [0u8; 32];
    let used = &mut entropy[..count.entropy_bytes()];
    rand::rngs::OsRng.fill_bytes(used);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, used)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()));
    entropy.zeroize();
    Ok(mnemonic?.to_string())
}

/// Checks word count, wordlist membership, and the entropy checksum.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}

/// Derives the 64-byte BIP-39 seed; the buffer zeroizes on drop.
pub fn mnemonic_to_seed(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; 64]>, CryptoError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
}

/// The English wordlist, for completion UIs.
pub fn word_list() -> &'static [&'static str] {
    Language::English.word_list()
}

/// Membership test against the English wordlist.
pub fn is_valid_word(word: &str) -> bool {
    Language::English.find_word(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn generate_each_word_count() {
        for count in [
            WordCount::Words12,
            WordCount::Words15,
            WordCount::Words18,
            WordCount::Words21,
            WordCount::Words24,
        ] {
            let phrase = generate_mnemonic(count).unwrap();
            assert_eq!(phrase.split_whitespace().count(), count.words());
            assert!(validate_mnemonic(&phrase));
        }
    }

    #[test]
    fn validate_known_phrase() {
        assert!(validate_mnemonic(TEST_MNEMONIC));
    }

    #[test]
    fn reject_unknown_word() {
        assert!(!validate_mnemonic("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzz"));
    }

    #[test]
    fn reject_bad_checksum() {
        // Same words, wrong final word for the checksum.
        assert!(!validate_mnemonic("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon"));
    }

    #[test]
    fn reject_wrong_word_count() {
        assert!(!validate_mnemonic("abandon abandon abandon"));
    }

    #[test]
    fn seed_matches_reference_vector() {
        // BIP-39 reference vector, empty passphrase.
        let seed = mnemonic_to_seed(TEST_MNEMONIC, "").unwrap();
        assert_eq!(
            hex::encode(seed.as_slice()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn seed_matches_trezor_vector() {
        // The same phrase with the "TREZOR" passphrase from the reference
        // vector set.
        let seed = mnemonic_to_seed(TEST_MNEMONIC, "TREZOR").unwrap();
        assert_eq!(hex::encode(&seed[..8]), "c55257c360c07c72");
    }

    #[test]
    fn passphrase_changes_seed() {
        let plain = mnemonic_to_seed(TEST_MNEMONIC, "").unwrap();
        let salted = mnemonic_to_seed(TEST_MNEMONIC, "mypassphrase").unwrap();
        assert_ne!(plain.as_slice(), salted.as_slice());
    }

    #[test]
    fn word_list_lookup() {
        assert_eq!(word_list().len(), 2048);
        assert!(is_valid_word("abandon"));
        assert!(is_valid_word("zoo"));
        assert!(!is_valid_word("notaword"));
        assert!(!is_valid_word(""));
    }
}
