//! Static Huffman coding with an end-of-stream symbol.
//!
//! The coded stream starts with 256 one-byte symbol counts. Symbol 256 marks
//! the end of the stream and always has count 1. Both sides rebuild the same
//! tree from the counts, so the counts are all that is transmitted.

use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;

/// Number of byte symbols.
pub const BYTE_SYMBOLS: usize = 256;

/// End-of-stream symbol.
pub const END_OF_STREAM: usize = 256;

/// Total number of leaf symbols.
pub const SYMBOLS: usize = BYTE_SYMBOLS + 1;

/// Largest transmitted count.
pub const MAX_COUNT: u32 = 255;

/// Tree node. Leaves are nodes `0..=END_OF_STREAM`; internal nodes follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Node {
    /// Weight of the subtree.
    count: u32,
    /// Child taken on a 0 bit.
    child_0: usize,
    /// Child taken on a 1 bit.
    child_1: usize,
}

/// A Huffman tree built from a count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree for byte counts `counts`; end-of-stream gets count 1.
    ///
    /// The two lowest nonzero weights are merged until one node remains.
    /// Each scan runs over the nodes in index order with a strict `<`, so
    /// ties go to the lowest index. The lowest weight becomes child 0.
    pub fn from_counts(counts: &[u8; BYTE_SYMBOLS]) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * SYMBOLS);
        nodes.extend(counts.iter().map(|&c| Node {
            count: c as u32,
            ..Node::default()
        }));
        nodes.push(Node {
            count: 1,
            ..Node::default()
        });

        let mut active: Vec<u32> = nodes.iter().map(|n| n.count).collect();
        let root = loop {
            let mut min_1: Option<usize> = None;
            let mut min_2: Option<usize> = None;
            for (i, &count) in active.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                if min_1.is_none_or(|m| count < active[m]) {
                    min_2 = min_1;
                    min_1 = Some(i);
                } else if min_2.is_none_or(|m| count < active[m]) {
                    min_2 = Some(i);
                }
            }

            // End-of-stream is always active, so min_1 is always found.
            let (Some(low), Some(high)) = (min_1, min_2) else {
                break min_1.unwrap_or(END_OF_STREAM);
            };

            let merged = active[low] + active[high];
            nodes.push(Node {
                count: merged,
                child_0: low,
                child_1: high,
            });
            active[low] = 0;
            active[high] = 0;
            active.push(merged);
        };

        Self { nodes, root }
    }

    /// Check whether `node` is a leaf.
    fn is_leaf(node: usize) -> bool {
        node <= END_OF_STREAM
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Root-to-leaf codes as `(bits, length)`, indexed by symbol.
    ///
    /// Symbols absent from the tree get `(0, 0)`.
    pub fn codes(&self) -> Vec<(u32, u8)> {
        let mut codes = vec![(0u32, 0u8); SYMBOLS];
        let mut stack = vec![(self.root, 0u32, 0u8)];
        while let Some((node, bits, len)) = stack.pop() {
            if Self::is_leaf(node) {
                codes[node] = (bits, len);
                continue;
            }
            let Node {
                child_0, child_1, ..
            } = self.nodes[node];
            stack.push((child_0, bits << 1, len + 1));
            stack.push((child_1, (bits << 1) | 1, len + 1));
        }
        codes
    }

    /// Code length of every symbol, 0 for symbols absent from the tree.
    pub fn code_lengths(&self) -> Vec<u8> {
        self.codes().into_iter().map(|(_, len)| len).collect()
    }

    /// Walk from the root to a leaf, one bit per edge.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<usize> {
        let mut node = self.root;
        while !Self::is_leaf(node) {
            let Node {
                child_0, child_1, ..
            } = self.nodes[node];
            node = if reader.read_bit()? { child_1 } else { child_0 };
        }
        Ok(node)
    }
}

/// Scale byte frequencies so the largest count fits in a byte.
///
/// Every byte that occurs keeps a count of at least 1.
pub fn scale_counts(frequencies: &[u64; BYTE_SYMBOLS]) -> [u8; BYTE_SYMBOLS] {
    let max = frequencies.iter().copied().max().unwrap_or(0);
    let divisor = max / MAX_COUNT as u64 + 1;

    let mut counts = [0u8; BYTE_SYMBOLS];
    for (count, &freq) in counts.iter_mut().zip(frequencies) {
        *count = match freq / divisor {
            0 if freq > 0 => 1,
            scaled => scaled as u8,
        };
    }
    counts
}

/// Count how often each byte occurs.
pub fn frequencies(data: &[u8]) -> [u64; BYTE_SYMBOLS] {
    let mut freq = [0u64; BYTE_SYMBOLS];
    for &byte in data {
        freq[byte as usize] += 1;
    }
    freq
}

/// Encode `data`: count table, coded bytes, end-of-stream, zero padding.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let counts = scale_counts(&frequencies(data));
    let tree = HuffmanTree::from_counts(&counts);
    let codes = tree.codes();

    let mut writer = BitWriter::with_capacity(BYTE_SYMBOLS + data.len());
    writer.write_slice(&counts);
    for &byte in data {
        let (bits, len) = codes[byte as usize];
        writer.write_bits(bits, len)?;
    }
    let (bits, len) = codes[END_OF_STREAM];
    writer.write_bits(bits, len)?;
    writer.align();

    Ok(writer.into_bytes())
}

/// Decode a Huffman stream that must produce exactly `expected` bytes.
pub fn decode(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let mut counts = [0u8; BYTE_SYMBOLS];
    counts.copy_from_slice(reader.read_slice(BYTE_SYMBOLS)?);
    let tree = HuffmanTree::from_counts(&counts);

    // A symbol costs at least one bit unless the tree is a lone leaf.
    let mut output = Vec::with_capacity(expected.min(reader.remaining_bits() as usize));
    loop {
        let symbol = tree.decode_symbol(&mut reader)?;
        if symbol == END_OF_STREAM {
            break;
        }
        if output.len() >= expected {
            return Err(ScanPackError::malformed(
                Stage::Entropy,
                format!("Huffman stream produces more than {expected} bytes"),
            ));
        }
        output.push(symbol as u8);
    }

    if output.len() != expected {
        return Err(ScanPackError::malformed(
            Stage::Entropy,
            format!(
                "Huffman stream ended after {} of {expected} bytes",
                output.len()
            ),
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(pairs: &[(u8, u8)]) -> [u8; BYTE_SYMBOLS] {
        let mut counts = [0u8; BYTE_SYMBOLS];
        for &(symbol, count) in pairs {
            counts[symbol as usize] = count;
        }
        counts
    }

    #[test]
    fn test_empty_tree_is_eos_leaf() {
        let tree = HuffmanTree::from_counts(&[0; BYTE_SYMBOLS]);
        assert_eq!(tree.root(), END_OF_STREAM);
        assert_eq!(tree.code_lengths()[END_OF_STREAM], 0);

        let encoded = encode(b"").unwrap();
        assert_eq!(encoded.len(), BYTE_SYMBOLS);
        assert!(decode(&encoded, 0).unwrap().is_empty());
    }

    #[test]
    fn test_tie_breaking() {
        // a:1, b:1, eos:1. The first merge takes a (child 0) and b (child 1).
        let tree = HuffmanTree::from_counts(&counts_of(&[(b'a', 1), (b'b', 1)]));
        let codes = tree.codes();
        // Second merge: eos (1) is lower than the (a, b) node (2).
        assert_eq!(codes[END_OF_STREAM], (0b0, 1));
        assert_eq!(codes[b'a' as usize], (0b10, 2));
        assert_eq!(codes[b'b' as usize], (0b11, 2));
    }

    #[test]
    fn test_single_symbol() {
        let data = vec![7u8; 100];
        let encoded = encode(&data).unwrap();
        // count table + 100 one-bit codes + one-bit eos
        assert_eq!(encoded.len(), BYTE_SYMBOLS + 13);
        assert_eq!(decode(&encoded, 100).unwrap(), data);
    }

    #[test]
    fn test_scale_counts() {
        let mut freq = [0u64; BYTE_SYMBOLS];
        freq[0] = 10_000;
        freq[1] = 1;
        freq[2] = 200;
        let counts = scale_counts(&freq);
        assert!(counts[0] <= 255 && counts[0] > 200);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[2], 5);
        assert_eq!(counts[3], 0);

        freq[0] = 254;
        assert_eq!(scale_counts(&freq)[0], 254);
    }

    #[test]
    fn test_kraft_equality() {
        let data = b"abracadabra, the quick brown fox jumps over the lazy dog";
        let tree = HuffmanTree::from_counts(&scale_counts(&frequencies(data)));
        let sum: f64 = tree
            .code_lengths()
            .iter()
            .filter(|&&len| len > 0)
            .map(|&len| 0.5f64.powi(len as i32))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i * i % 97) as u8).collect();
        assert_eq!(encode(&data).unwrap(), encode(&data).unwrap());
        let counts = scale_counts(&frequencies(&data));
        assert_eq!(HuffmanTree::from_counts(&counts), HuffmanTree::from_counts(&counts));
    }

    #[test]
    fn test_roundtrip_all_bytes() {
        let data: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
        let encoded = encode(&data).unwrap();
        assert_eq!(decode(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_length_mismatch() {
        let encoded = encode(b"hello world").unwrap();
        assert!(matches!(
            decode(&encoded, 10),
            Err(ScanPackError::MalformedFrame { .. })
        ));
        assert!(matches!(
            decode(&encoded, 12),
            Err(ScanPackError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn test_missing_count_table() {
        assert!(matches!(
            decode(&[0; 100], 0),
            Err(ScanPackError::OutOfData { .. })
        ));
    }

    #[test]
    fn test_stream_without_eos() {
        let encoded = encode(&[1u8; 64]).unwrap();
        // Drop the last byte that carries end-of-stream.
        let err = decode(&encoded[..encoded.len() - 1], 64).unwrap_err();
        assert!(matches!(err, ScanPackError::OutOfData { .. }));
    }
}
