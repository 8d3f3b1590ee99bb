use super::mask::{ChangeMask, MaskError};
use crate::sequence_processor::core::{ConversionStats, MatePair};
use log::warn;
use std::fmt;

/// Identifiers of this length or longer violate the SAM read name limit.
pub const MAX_IDENTIFIER_LENGTH: usize = 250;

pub const DEFAULT_WARNING_LIMIT: usize = 100;

/// A single-letter substitution applied to one mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub from: u8,
    pub to: u8,
}

impl Conversion {
    /// Single-end reads and first mates.
    pub const C_TO_T: Conversion = Conversion { from: b'C', to: b'T' };
    /// Second mates.
    pub const G_TO_A: Conversion = Conversion { from: b'G', to: b'A' };

    pub fn count(&self, seq: &[u8]) -> usize {
        seq.iter().filter(|&&b| b == self.from).count()
    }

    pub fn mask(&self, seq: &[u8]) -> ChangeMask {
        ChangeMask::from_matches(seq, self.from)
    }

    pub fn apply(&self, seq: &mut [u8]) {
        for base in seq.iter_mut().filter(|b| **b == self.from) {
            *base = self.to;
        }
    }

    /// Rebuilds the original sequence from a converted one and its mask.
    pub fn restore(&self, seq: &[u8], mask: &ChangeMask) -> Result<Vec<u8>, MaskError> {
        if seq.len() != mask.len() {
            return Err(MaskError::LengthMismatch {
                expected: mask.len(),
                got: seq.len(),
            });
        }
        let mut original = seq.to_vec();
        for i in mask.ones() {
            if original[i] != self.to {
                return Err(MaskError::UnexpectedBase {
                    position: i,
                    base: char::from(original[i]),
                });
            }
            original[i] = self.from;
        }
        Ok(original)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", char::from(self.from), char::from(self.to))
    }
}

/// Logs at most `limit` overflow warnings, then a single notice.
#[derive(Debug)]
struct WarningLimiter {
    limit: usize,
    seen: usize,
}

impl WarningLimiter {
    fn warn(&mut self, identifier: &[u8], pair: &MatePair) {
        if self.seen < self.limit {
            let sequences: Vec<_> = pair
                .records()
                .map(|r| String::from_utf8_lossy(&r.seq))
                .collect();
            warn!(
                "{} is not converted ({})",
                String::from_utf8_lossy(identifier),
                sequences.join(" ")
            );
            if self.seen + 1 == self.limit {
                warn!("only showing {} warnings", self.limit);
            }
        }
        self.seen += 1;
    }

    fn emitted(&self) -> usize {
        self.seen.min(self.limit)
    }
}

/// Converts mate pairs and keeps the run's counters.
#[derive(Debug)]
pub struct Converter {
    first: Conversion,
    second: Conversion,
    warnings: WarningLimiter,
    stats: ConversionStats,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_LIMIT)
    }
}

impl Converter {
    pub fn new(warning_limit: usize) -> Self {
        Self {
            first: Conversion::C_TO_T,
            second: Conversion::G_TO_A,
            warnings: WarningLimiter {
                limit: warning_limit,
                seen: 0,
            },
            stats: ConversionStats::default(),
        }
    }

    pub fn first_conversion(&self) -> Conversion {
        self.first
    }

    pub fn second_conversion(&self) -> Conversion {
        self.second
    }

    /// Converts one pair, giving every emitted record the shared identifier
    /// with one mask segment per mate.
    ///
    /// Masks are computed on the original sequences; substitution happens only
    /// after the identifier passes the length guard.
    pub fn convert(&mut self, mut pair: MatePair) -> MatePair {
        self.stats.reads += pair.len() as u64;

        let mut identifier = pair.identifier().to_vec();
        let mates = [(pair.first.as_ref(), self.first), (pair.second.as_ref(), self.second)];
        for (record, conversion) in mates
            .into_iter()
            .filter_map(|(record, conversion)| record.map(|r| (r, conversion)))
        {
            let mask = conversion.mask(&record.seq);
            self.stats.bases_converted += mask.count_ones() as u64;
            identifier.push(b'.');
            identifier.extend_from_slice(mask.to_hex().as_bytes());
        }

        if identifier.len() >= MAX_IDENTIFIER_LENGTH {
            identifier = fallback_identifier(&identifier, pair.len());
            self.stats.unconverted_reads += pair.len() as u64;
            self.warnings.warn(&identifier, &pair);
        } else {
            if let Some(record) = pair.first.as_mut() {
                self.first.apply(&mut record.seq);
            }
            if let Some(record) = pair.second.as_mut() {
                self.second.apply(&mut record.seq);
            }
        }

        for record in [pair.first.as_mut(), pair.second.as_mut()].into_iter().flatten() {
            record.id.clone_from(&identifier);
        }
        pair
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    pub fn into_stats(self) -> ConversionStats {
        self.stats
    }

    pub fn warnings_emitted(&self) -> usize {
        self.warnings.emitted()
    }
}

/// First `.` segment of the identifier followed by one `.0` per mate.
fn fallback_identifier(identifier: &[u8], mates: usize) -> Vec<u8> {
    let mut fallback = identifier
        .split(|&b| b == b'.')
        .next()
        .unwrap_or_default()
        .to_vec();
    for _ in 0..mates {
        fallback.extend_from_slice(b".0");
    }
    fallback
}

/// Splits an emitted identifier into the read name and its `mates` mask
/// segments, mate 1 first. Read names may themselves contain `.`.
pub fn split_identifier(identifier: &[u8], mates: usize) -> Option<(&[u8], Vec<&str>)> {
    let mut parts: Vec<&[u8]> = identifier.rsplitn(mates + 1, |&b| b == b'.').collect();
    if parts.len() != mates + 1 {
        return None;
    }
    let name = parts.pop()?;
    let masks = parts
        .into_iter()
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Some((name, masks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence_processor::core::ReadRecord;

    fn single(id: &str, seq: &str) -> MatePair {
        MatePair::single(ReadRecord::new(id, seq, "I".repeat(seq.len())))
    }

    #[test]
    fn test_single_end_example() {
        let mut converter = Converter::default();
        let pair = converter.convert(single("@read1", "ACGT"));
        let record = pair.first.unwrap();
        assert_eq!(record.id, b"@read1.4");
        assert_eq!(record.seq, b"ATGT");
        assert_eq!(record.qual, b"IIII");
        assert_eq!(converter.stats().reads, 1);
        assert_eq!(converter.stats().bases_converted, 1);
    }

    #[test]
    fn test_paired_conversion() {
        let mut converter = Converter::default();
        let pair = converter.convert(MatePair::paired(
            ReadRecord::new("@frag", "CCGA", "IIII"),
            ReadRecord::new("@frag", "GGTC", "JJJJ"),
        ));
        let first = pair.first.unwrap();
        let second = pair.second.unwrap();
        assert_eq!(first.id, b"@frag.c.c");
        assert_eq!(second.id, b"@frag.c.c");
        assert_eq!(first.seq, b"TTGA");
        assert_eq!(second.seq, b"AATC");
        assert_eq!(second.qual, b"JJJJ");
        assert_eq!(converter.stats().reads, 2);
        assert_eq!(converter.stats().bases_converted, 4);
    }

    #[test]
    fn test_second_mate_only() {
        let mut converter = Converter::default();
        let pair = converter.convert(MatePair {
            first: None,
            second: Some(ReadRecord::new("@r", "AGG", "III")),
        });
        let second = pair.second.unwrap();
        assert_eq!(second.id, b"@r.3");
        assert_eq!(second.seq, b"AAA");
    }

    #[test]
    fn test_lowercase_untouched() {
        let mut converter = Converter::default();
        let record = converter.convert(single("@r", "cCN")).first.unwrap();
        assert_eq!(record.id, b"@r.2");
        assert_eq!(record.seq, b"cTN");
    }

    #[test]
    fn test_already_converted_is_unchanged() {
        let mut converter = Converter::default();
        let record = converter.convert(single("@r", "ATGTTTGA")).first.unwrap();
        assert_eq!(record.seq, b"ATGTTTGA");
        assert_eq!(record.id, b"@r.0");
        assert_eq!(converter.stats().bases_converted, 0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut converter = Converter::default();
        let record = converter.convert(single("@r", "")).first.unwrap();
        assert_eq!(record.id, b"@r.0");
        assert!(record.seq.is_empty());
    }

    #[test]
    fn test_guard_boundary() {
        // "@" + name + ".4" is 249 characters
        let id = format!("@{}", "r".repeat(246));
        let mut converter = Converter::default();
        let record = converter.convert(single(&id, "ACGT")).first.unwrap();
        assert_eq!(record.id.len(), 249);
        assert_eq!(record.seq, b"ATGT");
        assert_eq!(converter.stats().unconverted_reads, 0);

        // one more character reaches the limit
        let id = format!("@{}", "r".repeat(247));
        let record = converter.convert(single(&id, "ACGT")).first.unwrap();
        assert_eq!(record.id, format!("{id}.0").into_bytes());
        assert_eq!(record.seq, b"ACGT");
        assert_eq!(converter.stats().unconverted_reads, 1);
        assert_eq!(converter.stats().bases_converted, 2);
        assert_eq!(converter.warnings_emitted(), 1);
    }

    #[test]
    fn test_guard_on_long_read() {
        let seq = "C".repeat(1000);
        let mut converter = Converter::default();
        let pair = converter.convert(MatePair::paired(
            ReadRecord::new("@long", seq.clone(), "I".repeat(1000)),
            ReadRecord::new("@long", "GGGG", "IIII"),
        ));
        let first = pair.first.unwrap();
        let second = pair.second.unwrap();
        assert_eq!(first.id, b"@long.0.0");
        assert_eq!(second.id, b"@long.0.0");
        assert_eq!(first.seq, seq.as_bytes());
        assert_eq!(second.seq, b"GGGG");
        assert_eq!(converter.stats().unconverted_reads, 2);
    }

    #[test]
    fn test_guard_keeps_first_dot_segment() {
        let seq = "C".repeat(1000);
        let mut converter = Converter::default();
        let record = converter.convert(single("@SRR1.17", &seq)).first.unwrap();
        assert_eq!(record.id, b"@SRR1.0");
    }

    #[test]
    fn test_warning_limit() {
        let seq = "C".repeat(1000);
        let mut converter = Converter::new(3);
        for _ in 0..5 {
            converter.convert(single("@r", &seq));
        }
        assert_eq!(converter.warnings_emitted(), 3);
        assert_eq!(converter.stats().unconverted_reads, 5);
    }

    #[test]
    fn test_restore() {
        let original = b"ACGTNCCAGC";
        let mask = Conversion::C_TO_T.mask(original);
        let mut converted = original.to_vec();
        Conversion::C_TO_T.apply(&mut converted);
        assert_eq!(converted, b"ATGTNTTAGT");
        assert_eq!(Conversion::C_TO_T.restore(&converted, &mask).unwrap(), original);
    }

    #[test]
    fn test_restore_errors() {
        let mask = Conversion::G_TO_A.mask(b"GGA");
        assert_eq!(
            Conversion::G_TO_A.restore(b"AA", &mask),
            Err(MaskError::LengthMismatch { expected: 3, got: 2 })
        );
        assert_eq!(
            Conversion::G_TO_A.restore(b"ACA", &mask),
            Err(MaskError::UnexpectedBase { position: 1, base: 'C' })
        );
    }

    #[test]
    fn test_split_identifier() {
        let (name, masks) = split_identifier(b"@SRR1.17.4.1f", 2).unwrap();
        assert_eq!(name, b"@SRR1.17");
        assert_eq!(masks, vec!["4", "1f"]);

        let (name, masks) = split_identifier(b"@read1.4", 1).unwrap();
        assert_eq!(name, b"@read1");
        assert_eq!(masks, vec!["4"]);

        assert!(split_identifier(b"@read1.4", 2).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Conversion::C_TO_T.to_string(), "C to T");
        assert_eq!(Conversion::G_TO_A.to_string(), "G to A");
    }
}
