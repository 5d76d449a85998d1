//! Huffman tree construction: greedy min-weight merging over a heap.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::freq::FreqTable;

/// One node of the Huffman tree.
///
/// Each node is exclusively owned by its parent; the whole tree exists
/// only long enough to derive the code book and is discarded afterwards.
#[derive(Debug)]
pub enum Node {
    Leaf {
        sym: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Aggregate weight: the leaf's count, or the sum of both subtrees.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Build the tree for `freq` by repeatedly merging the two
    /// lowest-weight nodes until one root remains.
    ///
    /// Heap order is `(weight, seq)` where `seq` is an insertion
    /// sequence number. Leaves are seeded in ascending symbol order, so
    /// equal-weight ties always resolve the same way and repeated runs
    /// over the same input produce byte-identical trees — which is what
    /// lets content-hash dedup recognize a re-upload of the same file.
    ///
    /// A single distinct symbol yields a tree that is one lone leaf; the
    /// code book deriver special-cases it.
    pub fn build(freq: &FreqTable) -> Node {
        let mut seq = 0u32;
        let mut heap: BinaryHeap<Reverse<HeapNode>> = BinaryHeap::with_capacity(freq.distinct());
        for (sym, weight) in freq.iter() {
            heap.push(Reverse(HeapNode {
                weight,
                seq,
                node: Node::Leaf { sym, weight },
            }));
            seq += 1;
        }

        loop {
            match (heap.pop(), heap.pop()) {
                (Some(Reverse(root)), None) => return root.node,
                (Some(Reverse(a)), Some(Reverse(b))) => {
                    // First-popped (lowest) node becomes the left child.
                    let weight = a.weight + b.weight;
                    heap.push(Reverse(HeapNode {
                        weight,
                        seq,
                        node: Node::Internal {
                            weight,
                            left: Box::new(a.node),
                            right: Box::new(b.node),
                        },
                    }));
                    seq += 1;
                }
                (None, _) => unreachable!("FreqTable guarantees at least one symbol"),
            }
        }
    }
}

/// Heap element: ordered by `(weight, seq)` only, never by tree shape.
struct HeapNode {
    weight: u64,
    seq: u32,
    node: Node,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for HeapNode {}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FreqTable;

    fn shape(node: &Node) -> String {
        match node {
            Node::Leaf { sym, .. } => format!("{sym}"),
            Node::Internal { left, right, .. } => format!("({} {})", shape(left), shape(right)),
        }
    }

    #[test]
    fn root_weight_is_total_count() {
        let freq = FreqTable::from_bytes(b"abracadabra").unwrap();
        let tree = Node::build(&freq);
        assert_eq!(tree.weight(), 11);
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let freq = FreqTable::from_bytes(b"zzzz").unwrap();
        match Node::build(&freq) {
            Node::Leaf { sym, weight } => {
                assert_eq!(sym, b'z');
                assert_eq!(weight, 4);
            }
            Node::Internal { .. } => panic!("one distinct symbol must build a lone leaf"),
        }
    }

    #[test]
    fn equal_weight_ties_are_deterministic() {
        // Four symbols with identical counts: the tie-break is the
        // insertion sequence, so the shape must be identical every run.
        let input = b"wxyz";
        let a = shape(&Node::build(&FreqTable::from_bytes(input).unwrap()));
        for _ in 0..10 {
            let b = shape(&Node::build(&FreqTable::from_bytes(input).unwrap()));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn two_symbols_lowest_goes_left() {
        let freq = FreqTable::from_bytes(b"aaab").unwrap();
        match Node::build(&freq) {
            Node::Internal { left, right, .. } => {
                assert!(matches!(*left, Node::Leaf { sym: b'b', .. }));
                assert!(matches!(*right, Node::Leaf { sym: b'a', .. }));
            }
            Node::Leaf { .. } => panic!("two symbols must build an internal root"),
        }
    }
}
