//! Self-describing file format: the frequency table followed by the packed bit stream.
//!
//! All integers are little-endian:
//!
//! | field        | size                    |
//! |--------------|-------------------------|
//! | magic `HUFP` | 4                       |
//! | version      | 1                       |
//! | symbol count | 4                       |
//! | per symbol   | 4 (scalar) + 8 (count)  |
//! | bit length   | 8                       |
//! | packed bits  | `ceil(bit length / 8)`  |
//!
//! Symbols are stored in ascending order. The tree is not stored: rebuilding it
//! from the frequency table yields the same tree the stream was encoded with.

use std::io::{Read, Write};

use bit_vec::BitVec;

use crate::{Codec, Error, FrequencyTable, Result};

const MAGIC: &[u8; 4] = b"HUFP";
const VERSION: u8 = 1;

/// Encoded text together with everything needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    frequencies: FrequencyTable<char>,
    bits: BitVec,
}

impl Container {
    /// Pairs a frequency table with a stream encoded under its tree.
    pub fn new(frequencies: FrequencyTable<char>, bits: BitVec) -> Self {
        Self { frequencies, bits }
    }

    /// Encodes `text` with its own frequency table.
    pub fn from_text(text: &str) -> Result<Self> {
        let codec = Codec::from_text(text)?;
        let encoded = codec.encode_text(text)?;
        Ok(Self::new(codec.frequencies(), encoded.into_bits()))
    }

    /// The stored frequency table.
    pub fn frequencies(&self) -> &FrequencyTable<char> {
        &self.frequencies
    }

    /// The stored bit stream.
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Rebuilds the codec.
    pub fn codec(&self) -> Result<Codec<char>> {
        Codec::new(&self.frequencies)
    }

    /// Rebuilds the tree and decodes the stored stream.
    pub fn decode_text(&self) -> Result<String> {
        self.codec()?.decode_text(&self.bits)
    }

    /// Serializes into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let symbol_count = u32::try_from(self.frequencies.len())
            .map_err(|_| Error::container("too many symbols"))?;

        writer.write_all(MAGIC)?;
        writer.write_all(&[VERSION])?;
        writer.write_all(&symbol_count.to_le_bytes())?;
        for (symbol, count) in &self.frequencies {
            writer.write_all(&u32::from(*symbol).to_le_bytes())?;
            writer.write_all(&(*count as u64).to_le_bytes())?;
        }
        writer.write_all(&(self.bits.len() as u64).to_le_bytes())?;
        writer.write_all(&self.bits.to_bytes())?;

        log::debug!(
            "wrote container with {} symbols and {} bits",
            symbol_count,
            self.bits.len()
        );
        Ok(())
    }

    /// Deserializes from `reader`, which must hold nothing after the container.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::container("bad magic"));
        }

        let version = read_u8(&mut reader)?;
        if version != VERSION {
            return Err(Error::container(format!("unsupported version {version}")));
        }

        let symbol_count = read_u32(&mut reader)?;
        if symbol_count == 0 {
            return Err(Error::container("empty symbol table"));
        }

        let mut counts = Vec::new();
        let mut previous: Option<char> = None;
        let mut total: usize = 0;
        for _ in 0..symbol_count {
            let scalar = read_u32(&mut reader)?;
            let symbol = char::from_u32(scalar)
                .ok_or_else(|| Error::container(format!("invalid scalar value {scalar:#x}")))?;
            if previous.map_or(false, |prev| prev >= symbol) {
                return Err(Error::container(format!(
                    "symbol {symbol:?} is out of order or repeated"
                )));
            }
            previous = Some(symbol);

            let count = usize::try_from(read_u64(&mut reader)?)
                .map_err(|_| Error::container("frequency does not fit in memory"))?;
            if count == 0 {
                return Err(Error::container(format!("zero frequency for {symbol:?}")));
            }
            // Every internal node holds a partial sum, so the total must fit.
            total = total
                .checked_add(count)
                .ok_or_else(|| Error::container("frequency total overflows"))?;
            counts.push((symbol, count));
        }

        let bit_len = usize::try_from(read_u64(&mut reader)?)
            .map_err(|_| Error::container("bit length does not fit in memory"))?;
        let mut packed = Vec::new();
        reader.read_to_end(&mut packed)?;
        if packed.len() != bit_len.div_ceil(8) {
            return Err(Error::container(format!(
                "expected {} bytes for {} bits, found {}",
                bit_len.div_ceil(8),
                bit_len,
                packed.len()
            )));
        }

        let mut bits = BitVec::from_bytes(&packed);
        bits.truncate(bit_len);

        log::debug!(
            "read container with {} symbols and {} bits",
            counts.len(),
            bits.len()
        );
        Ok(Self::new(FrequencyTable::from_counts(counts), bits))
    }

    /// Serializes into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Deserializes from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
