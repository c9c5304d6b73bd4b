//! Text form of a bit stream: one '0' or '1' character per bit.

use bit_vec::BitVec;

use crate::{Error, Result, StreamFault};

/// Renders bits as '0'/'1' characters.
pub fn to_bit_string(bits: &BitVec) -> String {
    bits.iter().map(|bit| if bit { '1' } else { '0' }).collect()
}

/// Parses '0'/'1' characters, skipping ASCII whitespace so line-wrapped
/// streams are accepted.
///
/// Any other character fails with [`Error::MalformedStream`] at its character offset.
pub fn parse_bit_string(text: &str) -> Result<BitVec> {
    let mut bits = BitVec::with_capacity(text.len());
    for (position, digit) in text.chars().enumerate() {
        match digit {
            '0' => bits.push(false),
            '1' => bits.push(true),
            c if c.is_ascii_whitespace() => {}
            c => return Err(Error::malformed(position, StreamFault::InvalidDigit(c))),
        }
    }
    Ok(bits)
}
