/// Maps codewords back to the symbols they stand for.
pub(crate) trait HuffmanEncoding {
    fn add_code(&mut self, code: &str, symbol: u8);
    fn lookup(&self, code: &str) -> Option<u8>;
}

/// Index of a node in a [`CodeTrie`].
pub(crate) type NodeId = usize;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<NodeId>; 2],
    symbol: Option<u8>,
}

/// Binary trie over codewords, with the nodes kept in one `Vec`.
///
/// Decoding walks one edge per input bit, instead of testing every codeword
/// against the remaining input.
#[derive(Debug, Clone)]
pub(crate) struct CodeTrie {
    nodes: Vec<TrieNode>,
}

impl CodeTrie {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Follow one edge. `bit` is 0 or 1.
    pub fn step(&self, from: NodeId, bit: usize) -> Option<NodeId> {
        self.nodes[from].children[bit]
    }

    /// The symbol whose codeword ends at `node`, if any.
    pub fn symbol_at(&self, node: NodeId) -> Option<u8> {
        self.nodes[node].symbol
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

impl Default for CodeTrie {
    fn default() -> Self {
        Self::new()
    }
}

fn bit_of(c: u8) -> Option<usize> {
    match c {
        b'0' => Some(0),
        b'1' => Some(1),
        _ => None,
    }
}

impl HuffmanEncoding for CodeTrie {
    fn add_code(&mut self, code: &str, symbol: u8) {
        let mut node = Self::ROOT;
        for c in code.bytes() {
            debug_assert!(bit_of(c).is_some(), "codeword {code:?} is not binary");
            let bit = usize::from(c == b'1');
            node = match self.nodes[node].children[bit] {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children[bit] = Some(next);
                    next
                }
            };
        }
        self.nodes[node].symbol = Some(symbol);
    }

    fn lookup(&self, code: &str) -> Option<u8> {
        let mut node = Self::ROOT;
        for c in code.bytes() {
            node = self.step(node, bit_of(c)?)?;
        }
        self.symbol_at(node)
    }
}
