use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Error, FrequencyTable, HuffmanNode, Result, Symbol};

/// Priority queue entry. `order` is the insertion sequence number and breaks
/// ties between equal frequencies: the earliest inserted entry is popped first.
#[derive(Debug)]
struct QueueEntry<S> {
    node: HuffmanNode<S>,
    order: usize,
}

impl<S> QueueEntry<S> {
    fn key(&self) -> (usize, usize) {
        (self.node.frequency(), self.order)
    }
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap hands out the lowest (frequency, order) first.
impl<S> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Builds the Huffman tree for a frequency table.
///
/// Leaves enter the queue in ascending symbol order and every merged node gets
/// the next sequence number. Equal frequencies are popped oldest first, the
/// first popped node becomes the left child. The same table therefore always
/// yields the same tree.
///
/// A table with a single symbol yields a lone leaf. An empty table fails with
/// [`Error::EmptyInput`].
pub fn build_tree<S: Symbol>(table: &FrequencyTable<S>) -> Result<HuffmanNode<S>> {
    let mut priority_queue: BinaryHeap<QueueEntry<S>> = table
        .iter()
        .enumerate()
        .map(|(order, (symbol, frequency))| QueueEntry {
            node: HuffmanNode::leaf(symbol.clone(), *frequency),
            order,
        })
        .collect();

    let mut next_order = priority_queue.len();

    while let Some(first) = priority_queue.pop() {
        let Some(second) = priority_queue.pop() else {
            let root = first.node;
            log::debug!(
                "built tree over {} symbols, total frequency {}, depth {}",
                table.len(),
                root.frequency(),
                root.depth()
            );
            return Ok(root);
        };

        priority_queue.push(QueueEntry {
            node: HuffmanNode::internal(first.node, second.node),
            order: next_order,
        });
        next_order += 1;
    }

    Err(Error::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_table_has_no_tree() {
        let table = FrequencyTable::<char>::from_text("");

        assert!(matches!(build_tree(&table), Err(Error::EmptyInput)));
    }

    #[test]
    fn single_symbol_is_lone_leaf() {
        let tree = build_tree(&FrequencyTable::from_text("aaaa")).expect("tree");

        assert_eq!(tree, HuffmanNode::leaf('a', 4));
    }

    #[test]
    fn two_symbols_lower_frequency_goes_left() {
        let tree = build_tree(&FrequencyTable::from_text("abb")).expect("tree");

        assert_eq!(
            tree,
            HuffmanNode::internal(HuffmanNode::leaf('a', 1), HuffmanNode::leaf('b', 2))
        );
    }

    #[test]
    fn equal_frequencies_merge_in_symbol_order() {
        let tree = build_tree(&FrequencyTable::from_text("dcba")).expect("tree");

        let expected = HuffmanNode::internal(
            HuffmanNode::internal(HuffmanNode::leaf('a', 1), HuffmanNode::leaf('b', 1)),
            HuffmanNode::internal(HuffmanNode::leaf('c', 1), HuffmanNode::leaf('d', 1)),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn merged_node_loses_ties_to_older_leaves() {
        // a:1 b:1 merge into 2, which then ties with c:2 but is younger.
        let tree = build_tree(&FrequencyTable::from_text("abcc")).expect("tree");

        let expected = HuffmanNode::internal(
            HuffmanNode::leaf('c', 2),
            HuffmanNode::internal(HuffmanNode::leaf('a', 1), HuffmanNode::leaf('b', 1)),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn abracadabra_tree() {
        let tree = build_tree(&FrequencyTable::from_text("abracadabra")).expect("tree");

        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.frequency(), 11);
    }

    fn check_sums(node: &HuffmanNode<u8>) -> bool {
        node.preorder().all(|(node, _)| match node {
            HuffmanNode::Leaf { .. } => true,
            HuffmanNode::Internal {
                frequency,
                left,
                right,
            } => *frequency == left.frequency() + right.frequency(),
        })
    }

    proptest! {
        #[test]
        fn proptest_frequency_conservation(data in proptest::collection::vec(any::<u8>(), 1..512)) {
            let table = FrequencyTable::from_symbols(data.iter().copied());
            let tree = build_tree(&table).expect("non-empty input");

            let leaf_total: usize = tree
                .preorder()
                .filter(|(node, _)| node.is_leaf())
                .map(|(node, _)| node.frequency())
                .sum();
            prop_assert_eq!(leaf_total, data.len());
            prop_assert_eq!(tree.leaf_count(), table.len());
            prop_assert!(check_sums(&tree));
        }

        #[test]
        fn proptest_deterministic(data in proptest::collection::vec(any::<u8>(), 1..256)) {
            let table = FrequencyTable::from_symbols(data.iter().copied());

            prop_assert_eq!(build_tree(&table).ok(), build_tree(&table.clone()).ok());
        }
    }
}
