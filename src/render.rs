use crate::{HuffmanNode, Symbol};

/// Renders the tree as indented text, one node per line, children labelled by
/// their digit.
///
/// ```rust
/// use huffpath::{build_tree, render_tree, FrequencyTable};
///
/// let tree = build_tree(&FrequencyTable::from_text("abb")).unwrap();
///
/// assert_eq!(render_tree(&tree), "(3)\n  0: 'a' (1)\n  1: 'b' (2)\n");
/// ```
pub fn render_tree<S: Symbol>(root: &HuffmanNode<S>) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize, None::<char>)];

    while let Some((node, depth, edge)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let label = edge.map(|digit| format!("{digit}: ")).unwrap_or_default();

        match node {
            HuffmanNode::Leaf { symbol, frequency } => {
                out.push_str(&format!("{indent}{label}{symbol:?} ({frequency})\n"));
            }
            HuffmanNode::Internal {
                frequency,
                left,
                right,
            } => {
                stack.push((right.as_ref(), depth + 1, Some('1')));
                stack.push((left.as_ref(), depth + 1, Some('0')));
                out.push_str(&format!("{indent}{label}({frequency})\n"));
            }
        }
    }

    out
}
