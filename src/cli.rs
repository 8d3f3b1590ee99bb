use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Do not show status messages
    #[arg(short = 's', long = "silent", global = true)]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert bisulfite sequencing reads to the fully converted state
    ///
    /// Single-end reads and first mates are C to T converted, second mates G to A.
    /// Give both -1 and -2 for an interleaved, bwa-mem compatible output. Read ids
    /// are trimmed at the first space or '#' and the converted positions are
    /// appended in hexadecimal.
    Fqconv {
        /// First read in pair or single end (FASTQ, "-" for stdin, gzip supported)
        #[arg(short = '1', value_name = "reads1.fq")]
        input1: Option<String>,

        /// Second read in pair (FASTQ, "-" for stdin, gzip supported)
        #[arg(short = '2', value_name = "reads2.fq")]
        input2: Option<String>,

        /// Converted reads output (FASTQ), "-" for stdout
        #[arg(value_name = "reads.conv.fq")]
        output: String,

        /// Reads buffered between writes (default: 1000000)
        #[arg(long)]
        batch_size: Option<u64>,

        /// Identifier overflow warnings shown before suppression (default: 100)
        #[arg(long)]
        max_warnings: Option<usize>,

        /// Write read and base counts as JSON to this file
        #[arg(long, value_name = "stats.json")]
        stats_json: Option<PathBuf>,
    },
}
