use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Reads processed, each mate counted separately.
    pub reads: u64,
    /// Source letters seen, including those in reads left unconverted.
    pub bases_converted: u64,
    /// Reads emitted unconverted because their identifier grew too long.
    pub unconverted_reads: u64,
}
