use std::collections::btree_map::{self, BTreeMap};

use bit_vec::BitVec;

use crate::{bits, FrequencyTable, HuffmanNode, Symbol};

/// Digit assigned to the only symbol of a one-leaf tree.
///
/// Such a tree has no edges, so the walk would otherwise hand out an empty code.
pub const SOLE_SYMBOL_BIT: bool = false;

/// Maps each symbol to its path from the root: `false` (0) for left, `true` (1) for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, BitVec>,
}

impl<S: Symbol> CodeTable<S> {
    /// Walks the tree depth first and records the path to every leaf.
    pub fn derive(root: &HuffmanNode<S>) -> Self {
        let mut codes = BTreeMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = root {
            codes.insert(symbol.clone(), BitVec::from_elem(1, SOLE_SYMBOL_BIT));
            return Self { codes };
        }

        let mut stack = vec![(root, BitVec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    log::trace!("code for {:?}: {}", symbol, bits::to_bit_string(&path));
                    codes.insert(symbol.clone(), path);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);

                    stack.push((right.as_ref(), right_path));
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        Self { codes }
    }

    /// Code of `symbol`, if the table covers it.
    pub fn get(&self, symbol: &S) -> Option<&BitVec> {
        self.codes.get(symbol)
    }

    /// Code of `symbol` rendered as '0'/'1' characters.
    pub fn code_string(&self, symbol: &S) -> Option<String> {
        self.get(symbol).map(bits::to_bit_string)
    }

    /// Number of symbols covered.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when the table covers no symbol.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, S, BitVec> {
        self.codes.iter()
    }

    /// Total bits needed to encode an input with these frequencies.
    ///
    /// Symbols of `frequencies` missing from the table are ignored.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() * count))
            .sum()
    }
}

impl<'a, S> IntoIterator for &'a CodeTable<S> {
    type Item = (&'a S, &'a BitVec);
    type IntoIter = btree_map::Iter<'a, S, BitVec>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Derives the code table of a tree. See [`CodeTable::derive`].
pub fn derive_code_table<S: Symbol>(root: &HuffmanNode<S>) -> CodeTable<S> {
    CodeTable::derive(root)
}
