use std::collections::BinaryHeap;
use std::collections::HashMap;

use crate::{BitString, Error, Result};

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(i64),
    Internal(usize, usize),
}

struct Arena {
    nodes: Vec<NodeKind>,
}

impl Arena {
    fn push(&mut self, kind: NodeKind) -> usize {
        self.nodes.push(kind);
        self.nodes.len() - 1
    }
}

/// A heap entry ordered by `(frequency, creation_sequence)`, giving the
/// min-heap merge a deterministic, stable tie-break: nodes created earlier
/// (leaves in first-occurrence order, then internal nodes in merge order)
/// win ties, matching the insertion-order tie-break the frequency counter
/// observes.
#[derive(PartialEq, Eq)]
struct HeapEntry {
    freq: u64,
    seq: u64,
    node: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A bijective mapping between symbols and prefix-free bitstrings, built by
/// [`build_dict`].
#[derive(Debug, Clone)]
pub struct HuffmanDict {
    forward: HashMap<i64, BitString>,
    reverse: HashMap<BitString, i64>,
}

impl HuffmanDict {
    /// A dictionary with no entries, for the degenerate case of encoding an
    /// empty symbol stream (e.g. `inter_band` on a single-band cube).
    pub fn empty() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn code(&self, symbol: i64) -> Option<&BitString> {
        self.forward.get(&symbol)
    }

    pub fn symbol(&self, code: &BitString) -> Option<i64> {
        self.reverse.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &i64> {
        self.forward.keys()
    }

    /// No code in the dictionary is a strict prefix of another, checked
    /// exhaustively rather than assumed.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitString> = self.forward.values().collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i == j {
                    continue;
                }
                if a.len() <= b.len() && a.iter().eq(b.iter().take(a.len())) {
                    return false;
                }
            }
        }
        true
    }
}

/// Count symbol occurrences in first-occurrence order, so the tree builder's
/// tie-break is deterministic regardless of hashing order.
fn ordered_frequencies(symbols: &[i64]) -> Vec<(i64, u64)> {
    let mut order = Vec::new();
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for &s in symbols {
        *counts.entry(s).or_insert_with(|| {
            order.push(s);
            0
        }) += 1;
    }
    order.into_iter().map(|s| (s, counts[&s])).collect()
}

/// Build a Huffman dictionary over `symbols` (pixel residuals or RLE
/// values/counts, both modeled as `i64` in this crate).
///
/// The degenerate single-symbol case is handled directly rather than by
/// threading a zero-frequency dummy leaf through the general merge: the
/// lone real symbol always receives code `"0"`.
pub fn build_dict(symbols: &[i64]) -> Result<HuffmanDict> {
    let freqs = ordered_frequencies(symbols);
    if freqs.is_empty() {
        return Err(Error::EmptyInput);
    }

    if freqs.len() == 1 {
        tracing::debug!(symbol = freqs[0].0, "single distinct symbol, assigning degenerate code directly");
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();
        let code = BitString::from_str01("0");
        forward.insert(freqs[0].0, code.clone());
        reverse.insert(code, freqs[0].0);
        return Ok(HuffmanDict { forward, reverse });
    }

    let mut arena = Arena { nodes: Vec::new() };
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    for (symbol, freq) in &freqs {
        let node = arena.push(NodeKind::Leaf(*symbol));
        heap.push(HeapEntry {
            freq: *freq,
            seq,
            node,
        });
        seq += 1;
    }

    while heap.len() > 1 {
        let a = heap.pop().unwrap();
        let b = heap.pop().unwrap();
        let merged = arena.push(NodeKind::Internal(a.node, b.node));
        heap.push(HeapEntry {
            freq: a.freq + b.freq,
            seq,
            node: merged,
        });
        seq += 1;
    }

    let root = heap.pop().unwrap().node;

    let mut forward = HashMap::new();
    let mut reverse = HashMap::new();
    let mut stack = vec![(root, BitString::new())];
    while let Some((node, path)) = stack.pop() {
        match &arena.nodes[node] {
            NodeKind::Leaf(symbol) => {
                let code = if path.is_empty() {
                    BitString::from_str01("0")
                } else {
                    path
                };
                forward.insert(*symbol, code.clone());
                reverse.insert(code, *symbol);
            }
            NodeKind::Internal(left, right) => {
                let mut left_path = path.clone();
                left_path.push_bit(false);
                let mut right_path = path;
                right_path.push_bit(true);
                stack.push((*left, left_path));
                stack.push((*right, right_path));
            }
        }
    }

    Ok(HuffmanDict { forward, reverse })
}

/// Concatenate the code for each symbol in `symbols`, in order.
pub fn encode(symbols: &[i64], dict: &HuffmanDict) -> Result<BitString> {
    let mut out = BitString::new();
    for &symbol in symbols {
        let code = dict
            .code(symbol)
            .ok_or(Error::LengthMismatch {
                expected: dict.len(),
                got: 0,
            })?;
        out.push(code);
    }
    Ok(out)
}

/// Where a [`decode_run`] scan should stop.
#[derive(Debug, Clone, Copy)]
pub enum Stop {
    /// Stop after decoding exactly this many symbols.
    Count(usize),
    /// Keep decoding until every bit starting at `start_bit` is consumed.
    Exhausted,
}

/// Scan `bits` starting at `start_bit`, matching accumulated prefixes
/// against `dict`, and return the decoded symbols along with the bit
/// offset immediately after the last consumed bit.
pub fn decode_run(bits: &BitString, start_bit: usize, dict: &HuffmanDict, stop: Stop) -> Result<(Vec<i64>, usize)> {
    let mut out = Vec::new();
    let mut current = BitString::new();
    let mut pos = start_bit;

    loop {
        if let Stop::Count(n) = stop {
            if out.len() == n {
                return Ok((out, pos));
            }
        }
        if pos >= bits.len() {
            if current.is_empty() {
                if let Stop::Count(n) = stop {
                    if out.len() != n {
                        return Err(Error::TruncatedRle {
                            decoded: out.len(),
                            expected: n,
                        });
                    }
                }
                return Ok((out, pos));
            }
            tracing::warn!(bit_offset = pos, "bitstring exhausted mid-code");
            return Err(Error::UnterminatedCode { bit_offset: pos });
        }
        current.push_bit(bits.get(pos));
        pos += 1;
        if let Some(symbol) = dict.symbol(&current) {
            out.push(symbol);
            current = BitString::new();
        }
    }
}

/// Decode a direct-mode stream end to end; the whole bitstring must
/// terminate exactly at a code boundary and produce exactly `expected_len`
/// symbols.
pub fn decode(bits: &BitString, dict: &HuffmanDict, expected_len: usize) -> Result<Vec<i64>> {
    let (symbols, consumed) = decode_run(bits, 0, dict, Stop::Exhausted)?;
    if consumed != bits.len() {
        return Err(Error::UnterminatedCode { bit_offset: consumed });
    }
    if symbols.len() != expected_len {
        return Err(Error::LengthMismatch {
            expected: expected_len,
            got: symbols.len(),
        });
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_single_symbol_gets_code_zero() {
        let dict = build_dict(&[7, 7, 7, 7]).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.code(7).unwrap().to_str01(), "0");

        let bits = encode(&[7, 7, 7, 7], &dict).unwrap();
        assert_eq!(bits.to_str01(), "0000");
        assert_eq!(decode(&bits, &dict, 4).unwrap(), vec![7, 7, 7, 7]);
    }

    #[test]
    fn dictionary_is_prefix_free_and_covers_all_symbols() {
        let symbols = [10, 2, 4, 1, 0, 1, 1, 2, 2, 2];
        let dict = build_dict(&symbols).unwrap();
        assert!(dict.is_prefix_free());
        for s in symbols {
            assert!(dict.code(s).is_some());
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let symbols = [3, 3, 3, -5, -5, 0, 9, 9, 9, 9];
        let dict = build_dict(&symbols).unwrap();
        let bits = encode(&symbols, &dict).unwrap();
        let decoded = decode(&bits, &dict, symbols.len()).unwrap();
        assert_eq!(decoded, symbols);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(build_dict(&[]), Err(Error::EmptyInput)));
    }
}
