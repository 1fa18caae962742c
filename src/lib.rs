//! A succinct bit-vector with constant-time rank queries, built on RRR
//! (Raman-Raman-Rao) encoding.
//!
//! Every `BLOCK_BITS`-bit block of the input is stored as a `(class,
//! offset)` pair: `class` is the block's popcount, `offset` is which of
//! the `C(BLOCK_BITS, class)` blocks of that popcount it is. The pairs are
//! packed into a dense array of 64-bit words and indexed by periodic
//! checkpoints so
//! [`BitSet::rank`] never scans more than one superblock of blocks.
//!
//! ```
//! use rrr_bitset::BitSet;
//!
//! let mut bitset = BitSet::new();
//! bitset.add_from_bit_source("1101001011".chars().map(|c| c == '1'));
//! assert_eq!(bitset.rank(4), 3);
//! ```

pub mod bits;
pub mod bitset;
pub mod checkpoint;
pub mod config;
pub mod encoder;
pub mod error;
pub mod packed;
pub mod source;
pub mod table;

#[macro_use]
extern crate static_assertions;

pub use bitset::BitSet;
pub use config::RrrParams;
pub use error::RrrError;
pub use source::{BitSource, BitString};

/// Block size in bits. Alternative block sizes are out of scope (see the
/// design notes); this crate is built for `BLOCK_BITS = 8` throughout.
pub const BLOCK_BITS: u32 = 8;

/// Mask selecting the low `BLOCK_BITS` bits of a word.
pub const BLOCK_MASK: u64 = (1u64 << BLOCK_BITS) - 1;

/// Bit width used to store a block's class (popcount). Must be large
/// enough to represent every value in `0..=BLOCK_BITS`.
pub const CLASS_CODE_WIDTH: u32 = 4;

/// Number of encoded blocks between consecutive rank-index checkpoints.
pub const SUPERBLOCK_BLOCKS: u64 = 8;

pub(crate) const fn ceil_log2(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        32 - (n - 1).leading_zeros()
    }
}

const_assert!(CLASS_CODE_WIDTH >= ceil_log2(BLOCK_BITS + 1));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_constants_satisfy_their_own_width_rule() {
        RrrParams::DEFAULT.validate().unwrap();
    }

    #[test]
    fn readme_style_smoke_test() {
        let mut bitset = BitSet::new();
        bitset.add_from_bit_source("1101001011".chars().map(|c| c == '1'));
        assert_eq!(bitset.len_blocks(), 2);
        assert_eq!(bitset.rank(4), 3);
        assert_eq!(bitset.rank(0), 0);
        assert!(bitset.rank(10) <= bitset.rank(16));
    }
}
