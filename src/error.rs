//! The crate's single error enum. Every variant corresponds to a
//! programmer-error condition named in the design notes, not to anything
//! a well-formed caller can trigger through normal use of [`crate::BitSet`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RrrError {
    /// `ClassTable::offset_of` found no entry for `value` in `class`'s row.
    /// Only possible if `value`'s popcount does not actually equal `class`,
    /// which the encoder never does to itself.
    #[error("no block of class {class} contains the byte value {value:#04x}")]
    TableMiss { class: u32, value: u8 },

    /// A `RrrParams` configuration could not represent every class in
    /// `0..=block_bits` in `class_code_width` bits.
    #[error(
        "class code width {width} cannot represent popcounts up to {max_class} (needs at least {min_width} bits)"
    )]
    InvalidClassWidth {
        width: u32,
        max_class: u32,
        min_width: u32,
    },
}
