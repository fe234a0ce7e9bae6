//! Huffman coding over characters.
//!
//! Builds a frequency-weighted binary tree, derives a prefix-free code table
//! from it and emits the encoding as a string of `'0'`/`'1'` characters.
//!
//! Tie-break: leaves enter the heap in ascending code-point order and merged
//! nodes are appended after them; among equal weights the node pushed first
//! is popped first. This fixes the exact bit layout for a given input.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;
use tt_core::{Result, TrimError};

use crate::stats::{compression_ratio, percent_saved, round_to};
use crate::traits::TextCodec;

/// Symbol → codeword.
pub type CodeTable = BTreeMap<char, String>;

/// Output of a Huffman encode pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuffmanResult {
    pub encoded_bits: String,
    pub code_table: CodeTable,
    pub original_size_bits: usize,
    pub compressed_size_bits: usize,
    pub compression_ratio: f64,
    pub space_saved_pct: f64,
}

impl HuffmanResult {
    fn empty() -> Self {
        Self {
            encoded_bits: String::new(),
            code_table: CodeTable::new(),
            original_size_bits: 0,
            compressed_size_bits: 0,
            compression_ratio: 1.0,
            space_saved_pct: 0.0,
        }
    }
}

/// Node of the prefix tree. Internal nodes own both children.
#[derive(Debug)]
pub enum PrefixNode {
    Leaf {
        symbol: char,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<PrefixNode>,
        right: Box<PrefixNode>,
    },
}

impl PrefixNode {
    pub fn weight(&self) -> usize {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Internal { .. } => None,
        }
    }
}

/// Heap entry. `BinaryHeap` is a max-heap, so the ordering is inverted:
/// lighter first, then lower insertion sequence.
struct Slot {
    weight: usize,
    seq: usize,
    node: PrefixNode,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Slot {}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Count occurrences of each character.
pub fn frequencies(text: &str) -> BTreeMap<char, usize> {
    let mut freq = BTreeMap::new();
    for ch in text.chars() {
        *freq.entry(ch).or_insert(0) += 1;
    }
    freq
}

/// Merge the two lightest nodes until one root remains.
pub fn build_tree(freq: &BTreeMap<char, usize>) -> Option<PrefixNode> {
    let mut heap = BinaryHeap::with_capacity(freq.len());
    let mut seq = 0;
    for (&symbol, &weight) in freq {
        heap.push(Slot { weight, seq, node: PrefixNode::Leaf { symbol, weight } });
        seq += 1;
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let weight = left.weight + right.weight;
        heap.push(Slot {
            weight,
            seq,
            node: PrefixNode::Internal {
                weight,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        seq += 1;
    }

    heap.pop().map(|slot| slot.node)
}

/// Walk the tree (left = `0`, right = `1`) and collect leaf paths.
///
/// Uses an explicit stack and consumes the tree as it goes, so skewed trees
/// neither recurse deeply here nor on drop. A root that is itself a leaf
/// gets the codeword `"0"`.
pub fn assign_codes(root: PrefixNode) -> CodeTable {
    let mut table = CodeTable::new();
    if let PrefixNode::Leaf { symbol, .. } = root {
        table.insert(symbol, "0".to_string());
        return table;
    }

    let mut stack = vec![(root, String::new())];
    while let Some((node, path)) = stack.pop() {
        match node {
            PrefixNode::Leaf { symbol, .. } => {
                table.insert(symbol, path);
            }
            PrefixNode::Internal { left, right, .. } => {
                stack.push((*right, format!("{path}1")));
                let mut left_path = path;
                left_path.push('0');
                stack.push((*left, left_path));
            }
        }
    }
    table
}

/// True when no codeword is a prefix of another.
pub fn is_prefix_free(table: &CodeTable) -> bool {
    let mut codes: Vec<&str> = table.values().map(String::as_str).collect();
    codes.sort_unstable();
    codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
}

/// Encode `text`. Never fails; empty input yields an empty result.
pub fn huffman_encode(text: &str) -> HuffmanResult {
    let freq = frequencies(text);
    let Some(root) = build_tree(&freq) else {
        return HuffmanResult::empty();
    };
    let code_table = assign_codes(root);

    let symbol_count: usize = freq.values().sum();
    let compressed_bits: usize = freq
        .iter()
        .map(|(symbol, count)| code_table.get(symbol).map_or(0, String::len) * count)
        .sum();

    let mut encoded_bits = String::with_capacity(compressed_bits);
    for ch in text.chars() {
        if let Some(code) = code_table.get(&ch) {
            encoded_bits.push_str(code);
        }
    }

    let original_bits = symbol_count * 8;
    debug!(
        symbols = symbol_count,
        distinct = code_table.len(),
        original_bits,
        compressed_bits = encoded_bits.len(),
        "huffman encode"
    );

    HuffmanResult {
        original_size_bits: original_bits,
        compressed_size_bits: encoded_bits.len(),
        compression_ratio: round_to(compression_ratio(original_bits, encoded_bits.len()), 3),
        space_saved_pct: round_to(percent_saved(original_bits, encoded_bits.len()), 2),
        encoded_bits,
        code_table,
    }
}

/// Decode a bit string produced with `code_table`.
///
/// Bits accumulate until they exactly match a codeword. A buffer that grows
/// past the longest codeword, or is left over at the end, means the table
/// does not belong to these bits.
pub fn huffman_decode(encoded_bits: &str, code_table: &CodeTable) -> Result<String> {
    if encoded_bits.is_empty() {
        return Ok(String::new());
    }

    let inverse: HashMap<&str, char> = code_table
        .iter()
        .map(|(&symbol, code)| (code.as_str(), symbol))
        .collect();
    let longest = code_table.values().map(String::len).max().unwrap_or(0);

    let mut decoded = String::new();
    let mut start = 0;
    for (offset, bit) in encoded_bits.char_indices() {
        if bit != '0' && bit != '1' {
            return Err(TrimError::InvalidBit { offset, found: bit });
        }
        let buffer = &encoded_bits[start..=offset];
        if let Some(&symbol) = inverse.get(buffer) {
            decoded.push(symbol);
            start = offset + 1;
        } else if buffer.len() >= longest {
            return Err(TrimError::UnknownCode { offset: start, pending: buffer.to_string() });
        }
    }

    if start < encoded_bits.len() {
        return Err(TrimError::UnknownCode {
            offset: start,
            pending: encoded_bits[start..].to_string(),
        });
    }
    Ok(decoded)
}

/// [`TextCodec`] adapter over [`huffman_encode`] / [`huffman_decode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCoder;

impl TextCodec for HuffmanCoder {
    type Encoded = HuffmanResult;

    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode(&self, text: &str) -> HuffmanResult {
        huffman_encode(text)
    }

    fn decode(&self, encoded: &HuffmanResult) -> Result<String> {
        huffman_decode(&encoded.encoded_bits, &encoded.code_table)
    }
}
