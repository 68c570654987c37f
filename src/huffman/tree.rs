use tracing::trace;

use crate::{collections::MinPriorityQueue, errors::EmptyDequeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(weight: u64, symbol: u8) -> Self {
        Node::Leaf { weight, symbol }
    }

    /// Join two subtrees. `left` is the one that came out of the queue first.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A leaf together with the codeword its position in the tree gives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedLeaf {
    pub symbol: u8,
    pub weight: u64,
    pub code: String,
}

/// Greedily merge the two lightest nodes until one remains.
///
/// `weights` and `symbols` are parallel. Returns `None` for an empty alphabet.
pub fn build<Q>(
    weights: &[u64],
    symbols: &[u8],
    mut queue: Q,
) -> Result<Option<Node>, EmptyDequeError>
where
    Q: MinPriorityQueue<u64, Node>,
{
    debug_assert_eq!(weights.len(), symbols.len());

    for (&weight, &symbol) in weights.iter().zip(symbols) {
        queue.insert(weight, Node::leaf(weight, symbol));
    }
    if queue.is_empty() {
        return Ok(None);
    }

    let mut merges = 0;
    while queue.len() > 1 {
        let left = queue.remove_min()?;
        let right = queue.remove_min()?;
        let parent = Node::merge(left, right);
        queue.insert(parent.weight(), parent);
        merges += 1;
    }
    trace!(merges, "built huffman tree");

    queue.remove_min().map(Some)
}

/// Walk the tree, appending '0' for every left edge and '1' for every right.
///
/// A tree that is a single leaf gets the codeword "0", so that every symbol
/// costs at least one bit.
pub fn assign_codes(root: &Node) -> Vec<CodedLeaf> {
    let mut leaves = Vec::new();
    let mut stack = vec![(root, String::new())];

    while let Some((node, code)) = stack.pop() {
        match node {
            Node::Leaf { weight, symbol } => {
                let code = if code.is_empty() {
                    "0".to_string()
                } else {
                    code
                };
                leaves.push(CodedLeaf {
                    symbol: *symbol,
                    weight: *weight,
                    code,
                });
            }
            Node::Internal { left, right, .. } => {
                let mut right_code = code.clone();
                right_code.push('1');
                let mut left_code = code;
                left_code.push('0');

                stack.push((&**right, right_code));
                stack.push((&**left, left_code));
            }
        }
    }

    leaves
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::collections::PriorityDeque;

    const TEXTBOOK: &[(u64, u8)] = &[
        (5, b'a'),
        (9, b'b'),
        (12, b'c'),
        (13, b'd'),
        (16, b'e'),
        (45, b'f'),
    ];

    fn build_from(pairs: &[(u64, u8)]) -> Option<Node> {
        let (weights, symbols): (Vec<_>, Vec<_>) = pairs.iter().copied().unzip();
        build(&weights, &symbols, PriorityDeque::new()).unwrap()
    }

    fn internal_weight_sum(node: &Node) -> u64 {
        match node {
            Node::Leaf { .. } => 0,
            Node::Internal { weight, left, right } => {
                weight + internal_weight_sum(left) + internal_weight_sum(right)
            }
        }
    }

    #[test]
    fn empty_alphabet_has_no_tree() {
        assert_eq!(build_from(&[]), None);
    }

    #[test]
    fn single_leaf_gets_one_bit() {
        let root = build_from(&[(4, b'a')]).unwrap();
        assert!(root.is_leaf());

        let leaves = assign_codes(&root);
        assert_eq!(
            leaves,
            vec![CodedLeaf {
                symbol: b'a',
                weight: 4,
                code: "0".into(),
            }]
        );
    }

    #[test]
    fn first_removed_goes_left() {
        let root = build_from(&[(1, b'x'), (2, b'y')]).unwrap();
        let Node::Internal { weight, left, right } = root else {
            panic!("expected an internal root");
        };
        assert_eq!(weight, 3);
        assert_eq!(*left, Node::leaf(1, b'x'));
        assert_eq!(*right, Node::leaf(2, b'y'));
    }

    #[test]
    fn root_weight_is_total() {
        let pairs = [(1, b'e'), (2, b'd'), (4, b'c'), (8, b'b'), (16, b'a')];
        let root = build_from(&pairs).unwrap();
        assert_eq!(root.weight(), 31);
    }

    /// Total code length equals the sum of internal node weights, and every
    /// leaf ends up with a code.
    #[test_case(&[(1, b'a'), (1, b'b')] ; "two equal")]
    #[test_case(TEXTBOOK ; "textbook")]
    #[test_case(&[(3, b'a'), (3, b'b'), (3, b'c'), (3, b'd'), (3, b'e')] ; "all ties")]
    fn code_lengths_match_tree_cost(pairs: &[(u64, u8)]) {
        let root = build_from(pairs).unwrap();
        let leaves = assign_codes(&root);
        assert_eq!(leaves.len(), pairs.len());

        let total: u64 = leaves.iter().map(|l| l.weight * l.code.len() as u64).sum();
        assert_eq!(total, internal_weight_sum(&root));
    }

    #[test]
    fn textbook_code_lengths() {
        let leaves = assign_codes(&build_from(TEXTBOOK).unwrap());
        let len_of = |s: u8| {
            let leaf = leaves.iter().find(|l| l.symbol == s).unwrap();
            leaf.code.len()
        };

        assert_eq!(len_of(b'f'), 1);
        assert_eq!(len_of(b'c'), 3);
        assert_eq!(len_of(b'd'), 3);
        assert_eq!(len_of(b'e'), 3);
        assert_eq!(len_of(b'a'), 4);
        assert_eq!(len_of(b'b'), 4);
    }
}
