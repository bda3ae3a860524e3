//! Compile-time Keccak-256.
//!
//! A `const fn` implementation of Keccak-f[1600] with rate 1088 and the
//! draft-NIST `0x01` padding byte, so selectors and event topics can be
//! embedded as constants:
//!
//! ```
//! use quill_primitives::keccak_const;
//!
//! const TRANSFER: [u8; 4] = keccak_const::selector("transfer(address,uint256)");
//! assert_eq!(TRANSFER, [0xa9, 0x05, 0x9c, 0xbb]);
//! ```
//!
//! The contract is byte-for-byte equality with the runtime path in
//! [`crate::hash`]; a test pins the two together.

const RATE: usize = 136;

const ROUND_CONSTANTS: [u64; 24] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

const fn keccak_f(mut a: [u64; 25]) -> [u64; 25] {
    let mut round = 0;
    while round < 24 {
        // Theta
        let mut c = [0u64; 5];
        let mut x = 0;
        while x < 5 {
            c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
            x += 1;
        }
        x = 0;
        while x < 5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            let mut y = 0;
            while y < 25 {
                a[x + y] ^= d;
                y += 5;
            }
            x += 1;
        }

        // Rho and Pi
        let mut last = a[1];
        let mut i = 0;
        while i < 24 {
            let j = PI[i];
            let lane = a[j];
            a[j] = last.rotate_left(RHO[i]);
            last = lane;
            i += 1;
        }

        // Chi
        let mut y = 0;
        while y < 25 {
            let row = [a[y], a[y + 1], a[y + 2], a[y + 3], a[y + 4]];
            x = 0;
            while x < 5 {
                a[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
                x += 1;
            }
            y += 5;
        }

        // Iota
        a[0] ^= ROUND_CONSTANTS[round];
        round += 1;
    }
    a
}

const fn absorb_block(mut state: [u64; 25], block: &[u8], offset: usize, len: usize) -> [u64; 25] {
    let mut i = 0;
    while i < len {
        state[i / 8] ^= (block[offset + i] as u64) << ((i % 8) * 8);
        i += 1;
    }
    state
}

/// Computes Keccak-256 at compile time.
pub const fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut state = [0u64; 25];
    let mut offset = 0;

    while input.len() - offset >= RATE {
        state = absorb_block(state, input, offset, RATE);
        state = keccak_f(state);
        offset += RATE;
    }

    let remainder = input.len() - offset;
    state = absorb_block(state, input, offset, remainder);
    // Keccak padding: 0x01 after the message, 0x80 on the final rate byte.
    state[remainder / 8] ^= 0x01u64 << ((remainder % 8) * 8);
    state[(RATE - 1) / 8] ^= 0x80u64 << (((RATE - 1) % 8) * 8);
    state = keccak_f(state);

    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = (state[i / 8] >> ((i % 8) * 8)) as u8;
        i += 1;
    }
    out
}

/// Derives a 4-byte function selector at compile time.
pub const fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Derives an event `topic0` at compile time.
pub const fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;
    use hex_literal::hex;

    const EMPTY: [u8; 32] = keccak256(b"");
    const TRANSFER_SELECTOR: [u8; 4] = selector("transfer(address,uint256)");
    const BALANCE_OF_SELECTOR: [u8; 4] = selector("balanceOf(address)");
    const TRANSFER_TOPIC: [u8; 32] = event_topic("Transfer(address,address,uint256)");

    #[test]
    fn const_empty_digest() {
        assert_eq!(
            EMPTY,
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn const_selectors() {
        assert_eq!(TRANSFER_SELECTOR, hex!("a9059cbb"));
        assert_eq!(BALANCE_OF_SELECTOR, hex!("70a08231"));
    }

    #[test]
    fn const_event_topic() {
        assert_eq!(
            TRANSFER_TOPIC,
            hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
    }

    #[test]
    fn const_matches_runtime() {
        let inputs: [&[u8]; 5] = [
            b"",
            b"abc",
            b"hello world",
            &[0x5au8; 135],
            &[0x11u8; 300],
        ];
        for input in inputs {
            assert_eq!(keccak256(input), hash::keccak256(input).0, "len {}", input.len());
        }
    }

    #[test]
    fn const_padding_edge_at_rate_boundary() {
        // 136-byte input forces an all-padding final block.
        let input = [0x42u8; 136];
        assert_eq!(keccak256(&input), hash::keccak256(input).0);
    }
}
