pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod sequence_processor;
pub mod utils;

pub use error::{FqconvError, Result};
