use crate::error::Result;
use crate::sequence_processor::core::MatePair;
use std::io::Write;

/// Reads buffered before a flush.
pub const DEFAULT_BATCH_SIZE: u64 = 1_000_000;

/// Buffers converted pairs in memory and writes them out in batches.
///
/// A batch is flushed once it holds at least `batch_size` reads, always after
/// a whole pair, so mates are never split across flushes.
pub struct BatchWriter<W: Write> {
    inner: W,
    buffer: Vec<u8>,
    batch_size: u64,
    pending_reads: u64,
    batches_written: u64,
}

impl<W: Write> BatchWriter<W> {
    pub fn new(inner: W, batch_size: u64) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            batch_size: batch_size.max(1),
            pending_reads: 0,
            batches_written: 0,
        }
    }

    /// Appends a pair to the batch. Returns `true` when the batch was flushed.
    pub fn write_pair(&mut self, pair: &MatePair) -> Result<bool> {
        pair.write_to(&mut self.buffer)?;
        self.pending_reads += pair.len() as u64;
        if self.pending_reads >= self.batch_size {
            self.flush_batch()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn flush_batch(&mut self) -> Result<()> {
        self.inner.write_all(&self.buffer)?;
        self.inner.flush()?;
        self.buffer.clear();
        self.pending_reads = 0;
        self.batches_written += 1;
        Ok(())
    }

    pub fn pending_reads(&self) -> u64 {
        self.pending_reads
    }

    pub fn batches_written(&self) -> u64 {
        self.batches_written
    }

    /// Writes whatever is left, even an empty batch, and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush_batch()?;
        Ok(self.inner)
    }
}
