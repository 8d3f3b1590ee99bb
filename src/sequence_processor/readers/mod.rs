mod fastq;

pub use fastq::{truncate_identifier, FastqInput, FastqPairReader};
