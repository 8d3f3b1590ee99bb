pub mod conversion;
pub mod core;
pub mod pipeline;
pub mod readers;
pub mod writer;

// Re-export commonly used items
pub use conversion::{Conversion, Converter};
pub use self::core::{ConversionStats, MatePair, ReadRecord};
pub use pipeline::Pipeline;
pub use readers::{FastqInput, FastqPairReader};
pub use writer::BatchWriter;
