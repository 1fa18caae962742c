//! Drives bits into the packed stream: buffers one block's worth of bits
//! in an 8-bit shift register, seals it into a `(class, offset)` code the
//! moment it fills, and emits a checkpoint every
//! [`crate::SUPERBLOCK_BLOCKS`] blocks.

use crate::checkpoint::Checkpoint;
use crate::packed::PackedBitStream;
use crate::table::{ClassTable, OFFSET_WIDTHS};
use crate::{BLOCK_BITS, CLASS_CODE_WIDTH, SUPERBLOCK_BLOCKS};

pub struct BlockEncoder {
    buffer: u8,
    bit_index: u64,
    block_count: u64,
    bit_sum: u64,
    // True once every bit pushed so far has been sealed into a block; false
    // while `buffer` holds bits not yet committed to the stream. Lets
    // `finalise` be idempotent and avoids emitting a phantom empty block
    // when the input length is an exact multiple of BLOCK_BITS.
    sealed: bool,
}

impl BlockEncoder {
    pub fn new() -> Self {
        Self {
            buffer: 0,
            bit_index: 0,
            block_count: 0,
            bit_sum: 0,
            sealed: true,
        }
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn push_bit(
        &mut self,
        bit: bool,
        table: &ClassTable,
        stream: &mut PackedBitStream,
        checkpoints: &mut Vec<Checkpoint>,
    ) {
        let pos_in_block = (self.bit_index % BLOCK_BITS as u64) as u32;
        if bit {
            self.buffer |= 1 << (BLOCK_BITS - 1 - pos_in_block);
        }
        self.bit_index += 1;
        self.sealed = false;

        if self.bit_index % BLOCK_BITS as u64 == 0 {
            self.seal(table, stream, checkpoints);
        }
    }

    /// Seals any buffered-but-not-yet-sealed bits into a final, zero-padded
    /// block. A no-op if the last `push_bit` already triggered a seal.
    pub fn finalise(
        &mut self,
        table: &ClassTable,
        stream: &mut PackedBitStream,
        checkpoints: &mut Vec<Checkpoint>,
    ) {
        if !self.sealed {
            self.seal(table, stream, checkpoints);
        }
    }

    fn seal(&mut self, table: &ClassTable, stream: &mut PackedBitStream, checkpoints: &mut Vec<Checkpoint>) {
        let class = self.buffer.count_ones();
        let offset = table
            .offset_of(class, self.buffer)
            .expect("a byte's own popcount always indexes into its class row");
        self.emit_block(class, offset as u64, stream, checkpoints);
        self.buffer = 0;
        self.sealed = true;
    }

    fn emit_block(
        &mut self,
        class: u32,
        offset: u64,
        stream: &mut PackedBitStream,
        checkpoints: &mut Vec<Checkpoint>,
    ) {
        stream.append(class as u64, CLASS_CODE_WIDTH);
        stream.append(offset, OFFSET_WIDTHS[class as usize]);
        self.block_count += 1;
        self.bit_sum += class as u64;

        tracing::trace!(class, offset, block = self.block_count - 1, "block sealed");

        if self.block_count % SUPERBLOCK_BLOCKS == 0 {
            let checkpoint = Checkpoint {
                bit_offset: stream.bit_length(),
                cum_popcount: self.bit_sum,
            };
            tracing::debug!(
                index = checkpoints.len(),
                bit_offset = checkpoint.bit_offset,
                cum_popcount = checkpoint.cum_popcount,
                "checkpoint emitted"
            );
            checkpoints.push(checkpoint);
        }
    }
}

impl Default for BlockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_str(encoder: &mut BlockEncoder, table: &ClassTable, stream: &mut PackedBitStream, checkpoints: &mut Vec<Checkpoint>, bits: &str) {
        for c in bits.chars() {
            encoder.push_bit(c == '1', table, stream, checkpoints);
        }
    }

    #[test]
    fn exact_multiple_of_block_bits_seals_no_phantom_block() {
        let table = ClassTable::new();
        let mut stream = PackedBitStream::new();
        let mut checkpoints = Vec::new();
        let mut encoder = BlockEncoder::new();

        push_str(&mut encoder, &table, &mut stream, &mut checkpoints, "00000000");
        assert_eq!(encoder.block_count(), 1);

        encoder.finalise(&table, &mut stream, &mut checkpoints);
        assert_eq!(encoder.block_count(), 1, "finalise must not add a second, empty block");
    }

    #[test]
    fn partial_block_is_sealed_on_finalise_zero_padded() {
        let table = ClassTable::new();
        let mut stream = PackedBitStream::new();
        let mut checkpoints = Vec::new();
        let mut encoder = BlockEncoder::new();

        push_str(&mut encoder, &table, &mut stream, &mut checkpoints, "1");
        assert_eq!(encoder.block_count(), 0);
        encoder.finalise(&table, &mut stream, &mut checkpoints);
        assert_eq!(encoder.block_count(), 1);

        let class = stream.extract(0, CLASS_CODE_WIDTH) as u32;
        assert_eq!(class, 1, "the single '1' plus seven zero-padding bits has popcount 1");
    }

    #[test]
    fn empty_input_seals_nothing() {
        let table = ClassTable::new();
        let mut stream = PackedBitStream::new();
        let mut checkpoints = Vec::new();
        let mut encoder = BlockEncoder::new();

        encoder.finalise(&table, &mut stream, &mut checkpoints);
        assert_eq!(encoder.block_count(), 0);
        assert_eq!(stream.bit_length(), 0);
    }

    #[test]
    fn checkpoint_emitted_every_superblock() {
        let table = ClassTable::new();
        let mut stream = PackedBitStream::new();
        let mut checkpoints = Vec::new();
        let mut encoder = BlockEncoder::new();

        for _ in 0..8 {
            push_str(&mut encoder, &table, &mut stream, &mut checkpoints, "00000000");
        }
        assert_eq!(encoder.block_count(), 8);
        assert_eq!(checkpoints.len(), 1);
        assert_eq!(checkpoints[0].cum_popcount, 0);
        assert_eq!(checkpoints[0].bit_offset, 8 * CLASS_CODE_WIDTH as u64);
    }
}
