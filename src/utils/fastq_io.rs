use crate::error::{FqconvError, Result};
use crate::sequence_processor::readers::FastqInput;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

/// Path meaning standard input or standard output.
pub const STDIO: &str = "-";

const BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Opens a FASTQ input, transparently decompressing files.
///
/// Standard input is read as plain text.
pub fn open_input(path: &str) -> Result<FastqInput> {
    if path == STDIO {
        return Ok(FastqInput::new(path, Box::new(io::stdin().lock())));
    }

    let file = File::open(path).map_err(|source| open_error(path, source))?;
    let inner: Box<dyn Read> = match niffler::get_reader(Box::new(file)) {
        Ok((inner, _compression)) => inner,
        // too short to carry a compression header
        Err(niffler::Error::FileTooShort) => {
            Box::new(File::open(path).map_err(|source| open_error(path, source))?)
        }
        Err(niffler::Error::IOError(source)) => return Err(open_error(path, source)),
        Err(other) => {
            return Err(open_error(
                path,
                io::Error::new(io::ErrorKind::InvalidData, other),
            ))
        }
    };
    Ok(FastqInput::new(
        path,
        Box::new(BufReader::with_capacity(BUFFER_SIZE, inner)),
    ))
}

/// Opens the plain-text output, creating or truncating the file.
pub fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == STDIO {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path).map_err(|source| open_error(path, source))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn open_error(path: &str, source: io::Error) -> FqconvError {
    FqconvError::Open {
        path: path.to_string(),
        source,
    }
}
