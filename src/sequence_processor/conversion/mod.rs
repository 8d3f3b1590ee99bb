//! Bisulfite conversion of mate pairs and the change masks recorded in read
//! identifiers.

mod converter;
mod mask;

pub use converter::{
    split_identifier, Conversion, Converter, DEFAULT_WARNING_LIMIT, MAX_IDENTIFIER_LENGTH,
};
pub use mask::{ChangeMask, MaskError};
