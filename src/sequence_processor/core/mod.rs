pub(crate) mod sequence;
pub(crate) mod stats;

pub use sequence::{MatePair, ReadRecord};
pub use stats::ConversionStats;
