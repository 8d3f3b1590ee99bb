use std::io::{self, Write};

/// One FASTQ record as it moves through the pipeline.
///
/// `id` holds the identifier line up to the first whitespace or `#`,
/// including the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecord {
    pub id: Vec<u8>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl ReadRecord {
    pub fn new(id: impl Into<Vec<u8>>, seq: impl Into<Vec<u8>>, qual: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }

    /// Writes the record as four FASTQ lines with `+` as the separator line.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.id)?;
        out.write_all(b"\n")?;
        out.write_all(&self.seq)?;
        out.write_all(b"\n+\n")?;
        out.write_all(&self.qual)?;
        out.write_all(b"\n")
    }
}

/// The records read in lock-step from the active inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatePair {
    pub first: Option<ReadRecord>,
    pub second: Option<ReadRecord>,
}

impl MatePair {
    pub fn single(record: ReadRecord) -> Self {
        Self {
            first: Some(record),
            second: None,
        }
    }

    pub fn paired(first: ReadRecord, second: ReadRecord) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    /// Shared identifier of the pair: mate 1's when present.
    ///
    /// Mates are assumed to carry the same name, so mate 2's identifier is
    /// never compared against mate 1's.
    pub fn identifier(&self) -> &[u8] {
        self.first
            .as_ref()
            .or(self.second.as_ref())
            .map(|r| r.id.as_slice())
            .unwrap_or_default()
    }

    /// Number of reads in the pair (one per active mate).
    pub fn len(&self) -> usize {
        usize::from(self.first.is_some()) + usize::from(self.second.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present records, mate 1 first.
    pub fn records(&self) -> impl Iterator<Item = &ReadRecord> {
        self.first.iter().chain(self.second.iter())
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for record in self.records() {
            record.write_to(out)?;
        }
        Ok(())
    }
}
