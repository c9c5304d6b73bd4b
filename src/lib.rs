//!
//! Huffman coding of text into prefix-free bit paths and back, implemented in rust
//!
//! The pipeline is: count symbols into a [FrequencyTable], build the tree with
//! [build_tree], derive a [CodeTable], then [encode] and [decode]. [Codec]
//! bundles the tree and table for one input.
//!
//! ## Example
//!
//! ```rust
//! use huffpath::{Codec, to_bit_string};
//!
//! let payload = "hello from the other side of the river";
//!
//! let codec = Codec::from_text(payload).unwrap();
//! let encoded = codec.encode_text(payload).unwrap();
//! let decoded = codec.decode_text(encoded.bits()).unwrap();
//!
//! assert!(encoded.compressed_size() < encoded.original_size());
//! assert_eq!(payload, decoded);
//! assert!(to_bit_string(encoded.bits()).chars().all(|c| c == '0' || c == '1'));
//! ```
//!
//! To decode in another session, persist a [Container], which carries the
//! frequency table next to the packed bits.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Created with help from:
// - https://en.wikipedia.org/wiki/Huffman_coding
// - https://aquarchitect.github.io/swift-algorithm-club/Huffman%20Coding/

use std::fmt::Debug;

mod bits;
mod code;
mod codec;
mod container;
mod error;
mod frequency;
mod node;
mod render;
mod tree;

pub use bits::{parse_bit_string, to_bit_string};
pub use code::{derive_code_table, CodeTable, SOLE_SYMBOL_BIT};
pub use codec::{
    compression_ratio, decode, decode_text, encode, Codec, Encoded, SOURCE_SYMBOL_BITS,
};
pub use container::Container;
pub use error::{Error, Result, StreamFault};
pub use frequency::{build_frequency_table, FrequencyTable};
pub use node::{HuffmanNode, Preorder};
pub use render::render_tree;
pub use tree::build_tree;

pub use bit_vec::BitVec;

/// A unit of the alphabet. Anything ordered, cloneable and printable qualifies.
pub trait Symbol: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Symbol for T {}
