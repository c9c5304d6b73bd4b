use bit_vec::BitVec;

use crate::code::SOLE_SYMBOL_BIT;
use crate::{
    bits, build_tree, derive_code_table, CodeTable, Error, FrequencyTable, HuffmanNode, Result,
    StreamFault, Symbol,
};

/// Bits per symbol of the uncompressed baseline (one byte per character).
pub const SOURCE_SYMBOL_BITS: usize = 8;

/// Output of an encode: the bit stream and the sizes it was measured at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    bits: BitVec,
    original_size: usize,
}

impl Encoded {
    /// The encoded bit stream.
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Takes the bit stream out.
    pub fn into_bits(self) -> BitVec {
        self.bits
    }

    /// Size of the input in bits, at [`SOURCE_SYMBOL_BITS`] per symbol.
    pub fn original_size(&self) -> usize {
        self.original_size
    }

    /// Size of the encoded stream in bits.
    pub fn compressed_size(&self) -> usize {
        self.bits.len()
    }

    /// `compressed_size / original_size * 100`. See [`compression_ratio`].
    pub fn compression_ratio(&self) -> Result<f64> {
        compression_ratio(self.original_size(), self.compressed_size())
    }

    /// The stream as '0'/'1' characters.
    pub fn to_bit_string(&self) -> String {
        bits::to_bit_string(&self.bits)
    }
}

/// Concatenates the code of every symbol, in input order.
///
/// Fails with [`Error::UnknownSymbol`] on the first symbol the table lacks.
pub fn encode<S, I>(symbols: I, table: &CodeTable<S>) -> Result<Encoded>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let mut bits = BitVec::new();
    let mut count = 0;

    for (position, symbol) in symbols.into_iter().enumerate() {
        let code = table.get(&symbol).ok_or_else(|| Error::UnknownSymbol {
            symbol: format!("{symbol:?}"),
            position,
        })?;
        bits.extend(code.iter());
        count += 1;
    }

    Ok(Encoded {
        bits,
        original_size: count * SOURCE_SYMBOL_BITS,
    })
}

/// Walks the tree along `bits`, emitting a symbol every time a leaf is reached.
///
/// The stream must end exactly on a code boundary. A stream that stops mid-code,
/// or that asks a leaf for a child, fails with [`Error::MalformedStream`].
pub fn decode<S: Symbol>(bits: &BitVec, root: &HuffmanNode<S>) -> Result<Vec<S>> {
    let mut decoded = Vec::new();
    let mut cursor = root;
    let mut codeword_start = 0;

    for (position, bit) in bits.iter().enumerate() {
        cursor = match cursor {
            HuffmanNode::Internal { left, right, .. } => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
            // Only a lone-leaf root is ever visited here; it reads its single digit.
            HuffmanNode::Leaf { .. } if bit == SOLE_SYMBOL_BIT => cursor,
            HuffmanNode::Leaf { .. } => {
                return Err(Error::malformed(position, StreamFault::NoChild));
            }
        };

        if let HuffmanNode::Leaf { symbol, .. } = cursor {
            decoded.push(symbol.clone());
            cursor = root;
            codeword_start = position + 1;
        }
    }

    if codeword_start != bits.len() {
        return Err(Error::malformed(
            bits.len(),
            StreamFault::Truncated { codeword_start },
        ));
    }

    Ok(decoded)
}

/// Decodes a stream of characters.
pub fn decode_text(bits: &BitVec, root: &HuffmanNode<char>) -> Result<String> {
    decode(bits, root).map(|symbols| symbols.into_iter().collect())
}

/// Encoded size as a percentage of the original size.
///
/// An original size of zero fails with [`Error::EmptyInput`].
pub fn compression_ratio(original_size: usize, compressed_size: usize) -> Result<f64> {
    if original_size == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(compressed_size as f64 / original_size as f64 * 100.0)
}

/// A Huffman tree together with the code table derived from it.
///
/// Both are fixed at construction; a new input needs a new codec.
///
/// ```rust
/// use huffpath::Codec;
///
/// let codec = Codec::from_text("abracadabra").unwrap();
/// let encoded = codec.encode_text("abracadabra").unwrap();
///
/// assert_eq!(encoded.compressed_size(), 23);
/// assert_eq!(codec.decode_text(encoded.bits()).unwrap(), "abracadabra");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec<S> {
    tree: HuffmanNode<S>,
    codes: CodeTable<S>,
}

impl<S: Symbol> Codec<S> {
    /// Builds the tree and code table for a frequency table.
    pub fn new(frequencies: &FrequencyTable<S>) -> Result<Self> {
        let tree = build_tree(frequencies)?;
        Ok(Self::from_tree(tree))
    }

    /// Wraps an existing tree and derives its code table.
    pub fn from_tree(tree: HuffmanNode<S>) -> Self {
        let codes = derive_code_table(&tree);
        Self { tree, codes }
    }

    /// Counts the symbols and builds the codec for them.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        Self::new(&FrequencyTable::from_symbols(symbols))
    }

    /// Root of the tree.
    pub fn tree(&self) -> &HuffmanNode<S> {
        &self.tree
    }

    /// Code of every symbol.
    pub fn code_table(&self) -> &CodeTable<S> {
        &self.codes
    }

    /// Frequency table recovered from the leaves. Building a codec from it
    /// yields an identical tree.
    pub fn frequencies(&self) -> FrequencyTable<S> {
        FrequencyTable::from_counts(self.tree.preorder().filter_map(|(node, _)| match node {
            HuffmanNode::Leaf { symbol, frequency } => Some((symbol.clone(), *frequency)),
            HuffmanNode::Internal { .. } => None,
        }))
    }

    /// Encodes symbols. See [`encode`].
    pub fn encode<I>(&self, symbols: I) -> Result<Encoded>
    where
        I: IntoIterator<Item = S>,
    {
        encode(symbols, &self.codes)
    }

    /// Decodes a stream produced with this codec. See [`decode`].
    pub fn decode(&self, bits: &BitVec) -> Result<Vec<S>> {
        decode(bits, &self.tree)
    }
}

impl Codec<char> {
    /// Builds the codec for the characters of `text`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(&FrequencyTable::from_text(text))
    }

    /// Encodes the characters of `text`.
    pub fn encode_text(&self, text: &str) -> Result<Encoded> {
        self.encode(text.chars())
    }

    /// Decodes a stream back into text.
    pub fn decode_text(&self, bits: &BitVec) -> Result<String> {
        decode_text(bits, &self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_bit_string;
    use proptest::prelude::*;

    #[test]
    fn abracadabra_round_trip() {
        let text = "abracadabra";
        let codec = Codec::from_text(text).expect("codec");
        let encoded = codec.encode_text(text).expect("encode");

        assert_eq!(codec.tree().leaf_count(), 5);
        assert_eq!(encoded.original_size(), 88);
        assert!(encoded.compressed_size() <= 23);
        assert!(encoded.compressed_size() < encoded.original_size());
        assert_eq!(codec.decode_text(encoded.bits()).expect("decode"), text);
    }

    #[test]
    fn single_symbol_round_trip() {
        let codec = Codec::from_text("aaaa").expect("codec");
        let encoded = codec.encode_text("aaaa").expect("encode");

        assert!(codec.tree().is_leaf());
        assert_eq!(encoded.to_bit_string(), "0000");
        assert_eq!(codec.decode_text(encoded.bits()).expect("decode"), "aaaa");
    }

    #[test]
    fn single_symbol_rejects_one_digit() {
        let codec = Codec::from_text("aaaa").expect("codec");
        let bits = parse_bit_string("001").expect("bits");

        assert!(matches!(
            codec.decode_text(&bits),
            Err(Error::MalformedStream {
                position: 2,
                reason: StreamFault::NoChild
            })
        ));
    }

    #[test]
    fn unknown_symbol_is_reported() {
        let codec = Codec::from_text("abc").expect("codec");

        match codec.encode_text("abz") {
            Err(Error::UnknownSymbol { symbol, position }) => {
                assert_eq!(symbol, "'z'");
                assert_eq!(position, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trailing_partial_code_is_malformed() {
        let codec = Codec::from_text("abracadabra").expect("codec");
        let mut bits = codec.encode_text("abra").expect("encode").into_bits();
        let boundary = bits.len();
        // 'a' is the lone one-digit code, so a trailing "1" starts a longer path.
        bits.push(true);

        assert_eq!(codec.code_table().code_string(&'a').as_deref(), Some("0"));
        assert!(matches!(
            codec.decode_text(&bits),
            Err(Error::MalformedStream {
                reason: StreamFault::Truncated { codeword_start },
                ..
            }) if codeword_start == boundary
        ));
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let codec = Codec::from_text("ab").expect("codec");

        assert_eq!(codec.decode_text(&BitVec::new()).expect("decode"), "");
    }

    #[test]
    fn empty_input_has_no_codec_or_ratio() {
        assert!(matches!(Codec::from_text(""), Err(Error::EmptyInput)));
        assert!(matches!(compression_ratio(0, 0), Err(Error::EmptyInput)));
    }

    #[test]
    fn ratio_is_percentage() {
        let ratio = compression_ratio(88, 22).expect("ratio");

        assert!((ratio - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn frequencies_rebuild_same_tree() {
        let codec = Codec::from_text("mississippi river").expect("codec");
        let rebuilt = Codec::new(&codec.frequencies()).expect("codec");

        assert_eq!(codec, rebuilt);
    }

    #[test]
    fn free_functions_match_codec() {
        let text = "hello from the other side of the river";
        let tree = build_tree(&crate::build_frequency_table(text)).expect("tree");
        let table = derive_code_table(&tree);
        let encoded = encode(text.chars(), &table).expect("encode");

        assert_eq!(decode_text(encoded.bits(), &tree).expect("decode"), text);
        assert_eq!(
            encoded.compressed_size(),
            table.weighted_length(&FrequencyTable::from_text(text))
        );
    }

    proptest! {
        #[test]
        fn proptest_round_trip(text in "\\PC{1,300}") {
            let codec = Codec::from_text(&text).expect("non-empty input");
            let encoded = codec.encode_text(&text).expect("all symbols known");

            prop_assert_eq!(codec.decode_text(encoded.bits()).expect("valid stream"), text);
        }

        #[test]
        fn proptest_round_trip_bytes(data in proptest::collection::vec(any::<u8>(), 1..512)) {
            let codec = Codec::from_symbols(data.iter().copied()).expect("non-empty input");
            let encoded = codec.encode(data.iter().copied()).expect("all symbols known");

            prop_assert!(encoded.compressed_size() <= encoded.original_size());
            prop_assert_eq!(codec.decode(encoded.bits()).expect("valid stream"), data);
        }

        #[test]
        fn proptest_truncation_is_detected(text in "[a-e]{2,100}") {
            let codec = Codec::from_text(&text).expect("non-empty input");
            let bits = codec.encode_text(&text).expect("encode").into_bits();
            let last_code = codec
                .code_table()
                .get(&text.chars().last().expect("non-empty"))
                .expect("known")
                .len();

            if last_code > 1 {
                let mut truncated = bits.clone();
                truncated.truncate(bits.len() - 1);
                let is_truncated = matches!(
                    codec.decode_text(&truncated),
                    Err(Error::MalformedStream { reason: StreamFault::Truncated { .. }, .. })
                );
                prop_assert!(is_truncated);
            }
        }
    }
}
