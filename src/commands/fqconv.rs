use crate::config::Config;
use crate::error::FqconvError;
use crate::sequence_processor::{
    BatchWriter, ConversionStats, Converter, FastqPairReader, Pipeline,
};
use crate::utils::fastq_io::{open_input, open_output, STDIO};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FqconvOptions {
    /// Single-end reads or first mates, C to T converted.
    pub input1: Option<String>,
    /// Second mates, G to A converted.
    pub input2: Option<String>,
    pub output: String,
    pub stats_json: Option<PathBuf>,
    pub silent: bool,
    pub config: Config,
}

pub fn run(options: FqconvOptions) -> Result<ConversionStats> {
    match (options.input1.as_deref(), options.input2.as_deref()) {
        (None, None) => {
            return Err(
                FqconvError::Configuration("-1 or/and -2 must be defined".to_string()).into(),
            )
        }
        (Some(STDIO), Some(STDIO)) => {
            return Err(FqconvError::Configuration(
                "-1 and -2 cannot both read from stdin".to_string(),
            )
            .into())
        }
        _ => {}
    }

    let first = options.input1.as_deref().map(open_input).transpose()?;
    let second = options.input2.as_deref().map(open_input).transpose()?;
    let output = open_output(&options.output)?;
    let reader = FastqPairReader::new(first, second)?;

    let converter = Converter::new(options.config.warning_limit);
    if reader.has_first() {
        info!("start: converting reads {}", converter.first_conversion());
    }
    if reader.has_second() {
        info!("start: converting reads {}", converter.second_conversion());
    }

    let progress = ProgressBarBuilder::new("Converting")
        .hidden(options.silent)
        .with_tick()
        .build()?;
    let pipeline = Pipeline::new(
        converter,
        BatchWriter::new(output, options.config.batch_size),
        progress,
    );
    let (stats, mut output) = pipeline.run(reader)?;
    output.flush()?;
    drop(output);

    info!(
        "end: {} reads processed, {} bases converted",
        stats.reads, stats.bases_converted
    );
    if stats.unconverted_reads > 0 {
        info!(
            "{} reads left unconverted because of identifier length",
            stats.unconverted_reads
        );
    }

    if let Some(path) = &options.stats_json {
        save_stats(path, &stats)?;
    }

    Ok(stats)
}

fn save_stats(path: &Path, stats: &ConversionStats) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create stats file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, stats).context("Failed to write stats")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
