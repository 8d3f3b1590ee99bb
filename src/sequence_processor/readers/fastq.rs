use crate::error::{FqconvError, Result};
use crate::sequence_processor::core::{MatePair, ReadRecord};
use std::io::BufRead;
use std::mem;

/// A named line-oriented input. The name is used in truncation errors.
pub struct FastqInput {
    name: String,
    reader: Box<dyn BufRead>,
    line: Vec<u8>,
}

impl FastqInput {
    pub fn new(name: impl Into<String>, reader: Box<dyn BufRead>) -> Self {
        Self {
            name: name.into(),
            reader,
            line: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the next line without trailing whitespace.
    ///
    /// Returns `false` at end of stream. A blank line is indistinguishable
    /// from the end of the stream.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        self.reader.read_until(b'\n', &mut self.line)?;
        let len = self.line.trim_ascii_end().len();
        self.line.truncate(len);
        Ok(!self.line.is_empty())
    }

    fn truncated(&self) -> FqconvError {
        FqconvError::Truncated {
            stream: self.name.clone(),
        }
    }
}

/// Reads 4-line FASTQ records from one or two inputs in lock-step.
///
/// Every active input yields one line before any of them advances, so mate 1
/// and mate 2 of a pair always come from the same record position.
pub struct FastqPairReader {
    first: Option<FastqInput>,
    second: Option<FastqInput>,
    finished: bool,
}

impl FastqPairReader {
    pub fn new(first: Option<FastqInput>, second: Option<FastqInput>) -> Result<Self> {
        if first.is_none() && second.is_none() {
            return Err(FqconvError::Configuration(
                "-1 or/and -2 must be defined".to_string(),
            ));
        }
        Ok(Self {
            first,
            second,
            finished: false,
        })
    }

    pub fn is_paired(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    pub fn has_first(&self) -> bool {
        self.first.is_some()
    }

    pub fn has_second(&self) -> bool {
        self.second.is_some()
    }

    /// Reads the next pair, `Ok(None)` once every active input has ended at a
    /// record boundary.
    pub fn next_pair(&mut self) -> Result<Option<MatePair>> {
        let mut first_lines: [Vec<u8>; 4] = Default::default();
        let mut second_lines: [Vec<u8>; 4] = Default::default();

        for n in 0..4 {
            let first_has = read_optional(&mut self.first)?;
            let second_has = read_optional(&mut self.second)?;

            if let (Some(input), Some(false)) = (&self.first, first_has) {
                if n > 0 || second_has == Some(true) {
                    return Err(input.truncated());
                }
                return Ok(None);
            }
            if let (Some(input), Some(false)) = (&self.second, second_has) {
                if n > 0 || first_has == Some(true) {
                    return Err(input.truncated());
                }
                return Ok(None);
            }

            if let Some(input) = self.first.as_mut() {
                first_lines[n] = mem::take(&mut input.line);
            }
            if let Some(input) = self.second.as_mut() {
                second_lines[n] = mem::take(&mut input.line);
            }
        }

        Ok(Some(MatePair {
            first: self.first.as_ref().map(|_| record_from_lines(first_lines)),
            second: self.second.as_ref().map(|_| record_from_lines(second_lines)),
        }))
    }
}

impl Iterator for FastqPairReader {
    type Item = Result<MatePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn read_optional(input: &mut Option<FastqInput>) -> Result<Option<bool>> {
    input.as_mut().map(FastqInput::read_line).transpose()
}

fn record_from_lines(lines: [Vec<u8>; 4]) -> ReadRecord {
    let [header, seq, _, qual] = lines;
    ReadRecord {
        id: truncate_identifier(&header).to_vec(),
        seq,
        qual,
    }
}

/// Keeps the identifier up to the first whitespace, then up to the first `#`.
///
/// Comments and index suffixes are not SAM compatible and are assumed to be
/// identical between mates.
pub fn truncate_identifier(line: &[u8]) -> &[u8] {
    let token = line
        .split(u8::is_ascii_whitespace)
        .find(|t| !t.is_empty())
        .unwrap_or_default();
    token.split(|&b| b == b'#').next().unwrap_or_default()
}
