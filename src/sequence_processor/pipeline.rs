use crate::error::Result;
use crate::sequence_processor::conversion::Converter;
use crate::sequence_processor::core::{ConversionStats, MatePair};
use crate::sequence_processor::writer::BatchWriter;
use indicatif::ProgressBar;
use log::info;
use std::io::Write;

/// Reader → converter → writer, one pair at a time.
pub struct Pipeline<W: Write> {
    converter: Converter,
    writer: BatchWriter<W>,
    progress: ProgressBar,
}

impl<W: Write> Pipeline<W> {
    pub fn new(converter: Converter, writer: BatchWriter<W>, progress: ProgressBar) -> Self {
        Self {
            converter,
            writer,
            progress,
        }
    }

    /// Consumes `pairs` until the end or the first error.
    ///
    /// On error the unflushed batch is dropped; batches already written stay
    /// in the output.
    pub fn run<I>(self, pairs: I) -> Result<(ConversionStats, W)>
    where
        I: IntoIterator<Item = Result<MatePair>>,
    {
        let Pipeline {
            mut converter,
            mut writer,
            progress,
        } = self;

        for pair in pairs {
            let converted = converter.convert(pair?);
            progress.inc(converted.len() as u64);
            if writer.write_pair(&converted)? {
                let reads = converter.stats().reads;
                progress.suspend(|| info!("status: {} reads processed", reads));
            }
        }

        let inner = writer.finish()?;
        progress.finish_and_clear();
        Ok((converter.into_stats(), inner))
    }
}
