//! The succinct bit-vector itself: ties the class table, packed stream,
//! block encoder, and rank-index checkpoints together into the one public
//! type this crate exists to provide.

use crate::bits::{popcount_prefix, value_of_class_offset};
use crate::checkpoint::{checkpoint_index_for_block, Checkpoint};
use crate::encoder::BlockEncoder;
use crate::packed::PackedBitStream;
use crate::source::BitSource;
use crate::table::{ClassTable, OFFSET_WIDTHS};
use crate::{BLOCK_BITS, CLASS_CODE_WIDTH, SUPERBLOCK_BLOCKS};

/// A succinct bit-vector with constant-time `rank`, backed by RRR
/// (class+offset) encoding.
///
/// Built in one pass from anything implementing [`BitSource`] (which
/// includes every `Iterator<Item = bool>`), then read-only: `rank`,
/// `recover_as_string`, and the introspection accessors never mutate the
/// structure, so a finished `BitSet` is `Send + Sync` and freely shareable
/// among readers.
pub struct BitSet {
    table: ClassTable,
    stream: PackedBitStream,
    checkpoints: Vec<Checkpoint>,
    encoder: BlockEncoder,
}

impl BitSet {
    pub fn new() -> Self {
        Self {
            table: ClassTable::new(),
            stream: PackedBitStream::new(),
            checkpoints: Vec::new(),
            encoder: BlockEncoder::new(),
        }
    }

    /// Preallocates `words` 64-bit words of backing storage.
    pub fn with_capacity(words: usize) -> Self {
        Self {
            table: ClassTable::new(),
            stream: PackedBitStream::with_capacity(words),
            checkpoints: Vec::new(),
            encoder: BlockEncoder::new(),
        }
    }

    /// Consumes `source` until it signals end-of-stream, sealing every
    /// full 8-bit block as it goes and finalising (zero-padding) any
    /// trailing partial block. Calling this more than once on the same
    /// `BitSet` is unspecified, as is calling it after any `rank` query.
    pub fn add_from_bit_source(&mut self, mut source: impl BitSource) {
        while let Some(bit) = source.next_bit() {
            self.encoder
                .push_bit(bit, &self.table, &mut self.stream, &mut self.checkpoints);
        }
        self.encoder
            .finalise(&self.table, &mut self.stream, &mut self.checkpoints);
    }

    pub fn len_blocks(&self) -> u64 {
        self.encoder.block_count()
    }

    pub fn len_bits(&self) -> u64 {
        self.len_blocks() * BLOCK_BITS as u64
    }

    /// The checkpoint list, exposed for tests and other introspection; not
    /// needed for ordinary `rank` queries.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Number of 1-bits in positions `[0, i)` of the original input.
    /// `i` beyond the encoded length clamps to the total popcount rather
    /// than erroring; `i == 0` always returns 0.
    pub fn rank(&self, i: u64) -> u64 {
        let block_count = self.len_blocks();
        let target_block = (i / BLOCK_BITS as u64).min(block_count);

        let superblock = target_block / SUPERBLOCK_BLOCKS;
        let (mut count, mut bit_cursor, mut block_index) =
            match checkpoint_index_for_block(target_block, SUPERBLOCK_BLOCKS) {
                Some(idx) => {
                    let cp = self.checkpoints[idx];
                    (cp.cum_popcount, cp.bit_offset, superblock * SUPERBLOCK_BLOCKS)
                }
                None => (0, 0, 0),
            };

        while block_index < target_block {
            let class = self.stream.extract(bit_cursor, CLASS_CODE_WIDTH) as u32;
            count += class as u64;
            bit_cursor += (CLASS_CODE_WIDTH + OFFSET_WIDTHS[class as usize]) as u64;
            block_index += 1;
        }

        let residue = i % BLOCK_BITS as u64;
        if target_block < block_count && residue != 0 {
            let class = self.stream.extract(bit_cursor, CLASS_CODE_WIDTH) as u32;
            let offset_width = OFFSET_WIDTHS[class as usize];
            let offset = self.stream.extract(bit_cursor + CLASS_CODE_WIDTH as u64, offset_width) as usize;
            let value = value_of_class_offset(class, offset);
            count += popcount_prefix(value, residue as u32) as u64;
        }

        tracing::trace!(i, target_block, superblock, "rank query");
        count
    }

    /// Decodes every block back to its literal bits, MSB-first. Inverse of
    /// construction, up to the final block's zero padding.
    pub fn recover_as_bits(&self) -> Vec<bool> {
        let mut out = Vec::with_capacity(self.len_bits() as usize);
        let mut bit_cursor = 0u64;
        for _ in 0..self.len_blocks() {
            let class = self.stream.extract(bit_cursor, CLASS_CODE_WIDTH) as u32;
            let offset_width = OFFSET_WIDTHS[class as usize];
            let offset = self.stream.extract(bit_cursor + CLASS_CODE_WIDTH as u64, offset_width) as usize;
            let value = value_of_class_offset(class, offset);
            for b in 0..BLOCK_BITS {
                out.push((value >> (BLOCK_BITS - 1 - b)) & 1 == 1);
            }
            bit_cursor += (CLASS_CODE_WIDTH + offset_width) as u64;
        }
        out
    }

    /// `recover_as_bits`, rendered as a string of `'0'`/`'1'` characters.
    pub fn recover_as_string(&self) -> String {
        self.recover_as_bits()
            .into_iter()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}
