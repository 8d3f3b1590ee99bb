//! Per-base change masks and their hexadecimal identifier encoding.
//!
//! A mask holds one bit per base. Read as a binary number with the first base
//! as the most significant bit, it is written in lowercase hexadecimal without
//! a `0x` prefix and without leading zero digits. Leading zero bits are
//! therefore not stored; decoding needs the sequence length to restore them.

use thiserror::Error;

const WORD_BITS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("invalid hexadecimal digit {0:?} in change mask")]
    InvalidDigit(char),

    #[error("change mask {hex:?} does not fit in {len} bases")]
    Overflow { hex: String, len: usize },

    #[error("sequence length {got} does not match mask length {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("base {base:?} at position {position} is not a converted base")]
    UnexpectedBase { position: usize, base: char },
}

/// Fixed-length bit array, bit `i` belonging to base `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeMask {
    words: Vec<u64>,
    len: usize,
}

impl ChangeMask {
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Marks every position of `seq` holding `base`.
    pub fn from_matches(seq: &[u8], base: u8) -> Self {
        let mut mask = Self::zeros(seq.len());
        for (i, &b) in seq.iter().enumerate() {
            if b == base {
                mask.set(i);
            }
        }
        mask
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Positions of set bits, in increasing order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.get(i))
    }

    /// Encodes the mask as hexadecimal.
    ///
    /// Nibbles are aligned to the last base, so the first digit carries the
    /// `len % 4` leading bits when the length is not a multiple of four. The
    /// zero mask, including the empty one, encodes as `"0"` so an identifier
    /// segment is never empty.
    pub fn to_hex(&self) -> String {
        let lead = match self.len % 4 {
            0 => 4,
            r => r,
        };
        let mut hex = String::with_capacity(self.len.div_ceil(4));
        let mut start = 0;
        let mut width = lead.min(self.len);
        while start < self.len {
            let nibble = (start..start + width)
                .fold(0u32, |acc, i| (acc << 1) | u32::from(self.get(i)));
            if nibble != 0 || !hex.is_empty() {
                hex.push(char::from_digit(nibble, 16).unwrap_or('0'));
            }
            start += width;
            width = 4;
        }
        if hex.is_empty() {
            hex.push('0');
        }
        hex
    }

    /// Decodes a hexadecimal mask for a sequence of `len` bases.
    ///
    /// Missing leading bits are zero. Set bits beyond `len` are rejected.
    pub fn from_hex(hex: &str, len: usize) -> Result<Self, MaskError> {
        let digits = hex
            .chars()
            .map(|c| c.to_digit(16).ok_or(MaskError::InvalidDigit(c)))
            .collect::<Result<Vec<u32>, _>>()?;

        let mut mask = Self::zeros(len);
        // walk from the last digit so bit positions line up with the last base
        let mut bit = 0usize;
        for digit in digits.into_iter().rev() {
            for k in 0..4 {
                if (digit >> k) & 1 == 1 {
                    if bit >= len {
                        return Err(MaskError::Overflow {
                            hex: hex.to_string(),
                            len,
                        });
                    }
                    mask.set(len - 1 - bit);
                }
                bit += 1;
            }
        }
        Ok(mask)
    }
}
