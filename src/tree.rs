use core::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::code::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

if_tracing! {
    use tracing::debug;
}

/// Handle to a node inside a [`HuffmanTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8, weight: u64 },
    Internal { left: NodeId, right: NodeId, weight: u64 },
}

impl Node {
    pub const fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Ordering key for the merge queue.
///
/// `rank` breaks weight ties: leaves rank by byte value, internal nodes rank after every leaf
/// in the order they were created. Ranks are unique, so the merge order is fully determined
/// by the frequency table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct MergeKey {
    weight: u64,
    rank: usize,
    id: NodeId,
}

/// A Huffman tree stored as an arena of [`Node`]s.
///
/// The root is always an internal node. A single-symbol input gets a zero-weight placeholder
/// leaf as the right sibling of its only symbol, so that symbol encodes as `0` instead of the
/// empty string. The placeholder never shows up in [`code_table`](Self::code_table).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    placeholder: Option<NodeId>,
}

/// Builds the tree and code table for `data`.
///
/// # Errors
///
/// [`HuffmanError::EmptyInput`] if `data` is empty.
pub fn build_code(data: &[u8]) -> Result<(HuffmanTree, CodeTable)> {
    let tree = HuffmanTree::from_bytes(data)?;
    let codes = tree.code_table();
    Ok((tree, codes))
}

impl HuffmanTree {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Builds the tree by repeatedly merging the two lightest nodes. The first node taken
    /// becomes the left child.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::EmptyInput`] if the table has no symbols, [`HuffmanError::LengthOverflow`]
    /// if the counts do not sum to a `u64`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        // every internal weight is bounded by the total, so merges cannot overflow past this
        frequencies.checked_total().ok_or(HuffmanError::LengthOverflow)?;
        let distinct = frequencies.distinct();
        let mut nodes = Vec::with_capacity(2 * distinct + 1);
        let mut queue = BinaryHeap::with_capacity(distinct);

        for (symbol, weight) in frequencies.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(Reverse(MergeKey {
                weight,
                rank: symbol as usize,
                id,
            }));
        }

        let tree = match distinct {
            0 => return Err(HuffmanError::EmptyInput),
            1 => Self::single_symbol(nodes),
            _ => {
                let mut merges = 0;
                let root = loop {
                    let Some(Reverse(first)) = queue.pop() else {
                        return Err(HuffmanError::EmptyInput);
                    };
                    let Some(Reverse(second)) = queue.pop() else {
                        break first.id;
                    };

                    let weight = first.weight + second.weight;
                    let id = NodeId(nodes.len());
                    nodes.push(Node::Internal {
                        left: first.id,
                        right: second.id,
                        weight,
                    });
                    queue.push(Reverse(MergeKey {
                        weight,
                        rank: 256 + merges,
                        id,
                    }));
                    merges += 1;
                };
                Self {
                    nodes,
                    root,
                    placeholder: None,
                }
            }
        };

        if_tracing! {
            debug!(target = "huffman", distinct, nodes = tree.nodes.len(), weight = tree.weight(), "tree built");
        }

        Ok(tree)
    }

    /// Hangs the lone leaf and a zero-weight placeholder under one root.
    fn single_symbol(mut nodes: Vec<Node>) -> Self {
        let (symbol, weight) = match nodes[0] {
            Node::Leaf { symbol, weight } => (symbol, weight),
            Node::Internal { .. } => unreachable!("arena starts with leaves"),
        };
        let placeholder = NodeId(1);
        nodes.push(Node::Leaf {
            symbol: symbol.wrapping_add(1),
            weight: 0,
        });
        nodes.push(Node::Internal {
            left: NodeId(0),
            right: placeholder,
            weight,
        });
        Self {
            nodes,
            root: NodeId(2),
            placeholder: Some(placeholder),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Whether `id` is the filler sibling of a single-symbol tree.
    pub fn is_placeholder(&self, id: NodeId) -> bool {
        self.placeholder == Some(id)
    }

    /// Total weight, equal to the length of the input the tree was built from.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Number of real symbols, not counting the placeholder.
    pub fn leaf_count(&self) -> usize {
        self.real_leaves().count()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// Recovers the frequency table from the leaves.
    pub fn frequencies(&self) -> FrequencyTable {
        self.real_leaves()
            .map(|node| match *node {
                Node::Leaf { symbol, weight } => (symbol, weight),
                Node::Internal { weight, .. } => unreachable!("internal node with weight {weight} among leaves"),
            })
            .collect()
    }

    /// Derives the code of every real leaf: `0` for each left turn, `1` for each right turn.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = CodeTable::new();
        let mut stack = vec![(self.root, Code::new())];

        while let Some((id, prefix)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { symbol, .. } => {
                    if !self.is_placeholder(id) {
                        codes.insert(symbol, prefix);
                    }
                }
                Node::Internal { left, right, .. } => {
                    let mut right_code = prefix.clone();
                    right_code.push(true);
                    let mut left_code = prefix;
                    left_code.push(false);
                    stack.push((right, right_code));
                    stack.push((left, left_code));
                }
            }
        }

        codes
    }

    fn real_leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(index, node)| node.is_leaf() && !self.is_placeholder(NodeId(index)))
            .map(|(_, node)| node)
    }
}
