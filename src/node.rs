/// A node of the Huffman tree.
///
/// Children are owned, so a tree never shares subtrees. The frequency of an
/// internal node is always the sum of its children's frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S> {
    /// Terminates a path and carries one symbol of the alphabet.
    Leaf {
        /// The symbol this leaf encodes.
        symbol: S,
        /// How often the symbol occurred.
        frequency: usize,
    },
    /// Joins two subtrees. The left edge is digit 0, the right edge digit 1.
    Internal {
        /// Sum of both children's frequencies.
        frequency: usize,
        /// Subtree reached by digit 0.
        left: Box<HuffmanNode<S>>,
        /// Subtree reached by digit 1.
        right: Box<HuffmanNode<S>>,
    },
}

impl<S> HuffmanNode<S> {
    /// Creates a leaf.
    pub fn leaf(symbol: S, frequency: usize) -> Self {
        Self::Leaf { symbol, frequency }
    }

    /// Joins two nodes under a new parent whose frequency is their sum.
    pub fn internal(left: Self, right: Self) -> Self {
        Self::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Frequency of the node.
    pub fn frequency(&self) -> usize {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// True for [`HuffmanNode::Leaf`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// The symbol of a leaf.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Self::Leaf { symbol, .. } => Some(symbol),
            Self::Internal { .. } => None,
        }
    }

    /// Left child of an internal node.
    pub fn left(&self) -> Option<&Self> {
        match self {
            Self::Internal { left, .. } => Some(left.as_ref()),
            Self::Leaf { .. } => None,
        }
    }

    /// Right child of an internal node.
    pub fn right(&self) -> Option<&Self> {
        match self {
            Self::Internal { right, .. } => Some(right.as_ref()),
            Self::Leaf { .. } => None,
        }
    }

    /// Child selected by a digit: `false` is 0 (left), `true` is 1 (right).
    pub fn child(&self, bit: bool) -> Option<&Self> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    /// Visits the subtree in pre-order, left before right.
    pub fn preorder(&self) -> Preorder<'_, S> {
        Preorder {
            stack: vec![(self, 0)],
        }
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.preorder().map(|(_, depth)| depth).max().unwrap_or(0)
    }
}

/// Pre-order walk yielding every node with its depth.
///
/// Uses an explicit stack, so heavily skewed trees do not grow the call stack.
#[derive(Debug, Clone)]
pub struct Preorder<'a, S> {
    stack: Vec<(&'a HuffmanNode<S>, usize)>,
}

impl<'a, S> Iterator for Preorder<'a, S> {
    type Item = (&'a HuffmanNode<S>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let HuffmanNode::Internal { left, right, .. } = node {
            self.stack.push((right.as_ref(), depth + 1));
            self.stack.push((left.as_ref(), depth + 1));
        }
        Some((node, depth))
    }
}
