//! Typed construction parameters for the RRR encoding.
//!
//! There are no files or environment variables to read here; the shipped
//! [`crate::BitSet`] always uses the const-asserted defaults, since
//! alternative block sizes are out of scope (see the design notes).
//! `RrrParams` exists so the width-sufficiency rule the const assertion
//! enforces at compile time is also a reusable, independently testable
//! runtime check, e.g. for a caller experimenting with a different
//! `class_code_width` before wiring it through as a new set of crate
//! constants.

use crate::error::RrrError;
use crate::{ceil_log2, BLOCK_BITS, CLASS_CODE_WIDTH, SUPERBLOCK_BLOCKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RrrParams {
    pub block_bits: u32,
    pub class_code_width: u32,
    pub superblock_blocks: u64,
}

impl RrrParams {
    /// The parameters this crate is actually built with.
    pub const DEFAULT: RrrParams = RrrParams {
        block_bits: BLOCK_BITS,
        class_code_width: CLASS_CODE_WIDTH,
        superblock_blocks: SUPERBLOCK_BLOCKS,
    };

    /// Checks the one invariant the design notes call out explicitly:
    /// `class_code_width >= ceil(log2(block_bits + 1))`, i.e. wide enough
    /// to represent every popcount from 0 to `block_bits` inclusive.
    pub fn validate(&self) -> Result<(), RrrError> {
        let min_width = ceil_log2(self.block_bits + 1);
        if self.class_code_width < min_width {
            return Err(RrrError::InvalidClassWidth {
                width: self.class_code_width,
                max_class: self.block_bits,
                min_width,
            });
        }
        Ok(())
    }
}

impl Default for RrrParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
