pub mod fastq_io;
pub mod logging;
pub(crate) mod progress_bar_builder;
