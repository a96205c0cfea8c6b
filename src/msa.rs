//! Building a compacted variation graph from a multiple sequence
//! alignment.
//!
//! Every column of the alignment contributes one node per distinct
//! base, with each gap becoming a node of its own that has an empty
//! base. Each sequence is then threaded through its nodes in
//! identifier order, and non-branching runs of nodes are squashed
//! into single nodes. The result is emitted as a GFA with one segment
//! per node, a link per edge, and a path per sequence.

pub mod alignment;
pub mod emit;

pub use self::alignment::*;
pub use self::emit::*;

use std::collections::BTreeSet;

use bstr::{BStr, BString, ByteSlice};
use fnv::FnvHashMap;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::parser::{GFAError, GFAResult};

/// Whether squashing stops after one pass or repeats until nothing
/// more can be merged. Purging gap nodes can expose new linear runs,
/// so a single pass is not always fully compacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compaction {
    SinglePass,
    FixedPoint,
}

impl Default for Compaction {
    fn default() -> Self {
        Compaction::FixedPoint
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsaConfig {
    /// Rows with this name are deleted before building nodes
    pub consensus_name: BString,
    /// The gap symbol of the alignment
    pub gap: u8,
    pub compaction: Compaction,
}

impl Default for MsaConfig {
    fn default() -> Self {
        MsaConfig {
            consensus_name: BString::from(CONSENSUS_NAME),
            gap: b'-',
            compaction: Compaction::default(),
        }
    }
}

/// A node of the alignment graph. Sequences are referred to by their
/// index in the graph's sequence list, and other nodes by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Node {
    base: BString,
    seqs: Vec<usize>,
    out_edges: BTreeSet<usize>,
    in_edges: BTreeSet<usize>,
}

impl Node {
    fn new(base: BString, seq: usize) -> Self {
        Node {
            base,
            seqs: vec![seq],
            ..Default::default()
        }
    }

    pub fn base(&self) -> &BStr {
        self.base.as_bstr()
    }

    /// Gap nodes have no base; they only exist until compaction.
    pub fn is_gap(&self) -> bool {
        self.base.is_empty()
    }

    /// Indices of the contributing sequences, ascending
    pub fn seqs(&self) -> &[usize] {
        &self.seqs
    }

    pub fn contains_seq(&self, seq: usize) -> bool {
        self.seqs.binary_search(&seq).is_ok()
    }

    pub fn out_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.out_edges.iter().copied()
    }

    pub fn in_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_edges.iter().copied()
    }
}

/// The nodes built from an alignment. Node identifiers are dense and
/// start at 1; node `id` is stored at index `id - 1`, so removing
/// nodes renumbers the rest while keeping their order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MsaGraph {
    nodes: Vec<Node>,
    seq_ids: Vec<BString>,
}

impl MsaGraph {
    /// Create one node per distinct base in each column, and one node
    /// per gap. Identifiers increase from left to right; within a
    /// column, nodes are ordered by the first row they appear in.
    /// No edges are drawn.
    pub fn build<A: Alignment + ?Sized>(msa: &A, config: &MsaConfig) -> Self {
        let gap = config.gap;
        let seq_ids: Vec<BString> = (0..msa.rows())
            .map(|row| BString::from(msa.row_name(row).as_bytes()))
            .collect();

        let mut nodes = Vec::new();
        let mut by_base: FnvHashMap<u8, usize> = FnvHashMap::default();

        for column in 0..msa.columns() {
            by_base.clear();
            let column_start = nodes.len();
            for row in 0..msa.rows() {
                let base = msa.base(row, column);
                if base == gap {
                    nodes.push(Node::new(BString::from(""), row));
                    continue;
                }
                match by_base.get(&base) {
                    Some(&ix) => {
                        let node: &mut Node = &mut nodes[column_start + ix];
                        node.seqs.push(row);
                    }
                    None => {
                        by_base.insert(base, nodes.len() - column_start);
                        nodes.push(Node::new(BString::from(vec![base]), row));
                    }
                }
            }
        }

        log::debug!(
            "built {} nodes from {} rows and {} columns",
            nodes.len(),
            msa.rows(),
            msa.columns()
        );

        MsaGraph { nodes, seq_ids }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.out_edges.len()).sum()
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        id.checked_sub(1).and_then(|ix| self.nodes.get(ix))
    }

    /// Iterate over `(identifier, node)` in ascending identifier order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(ix, n)| (ix + 1, n))
    }

    /// The names of the aligned sequences, indexed by the values in
    /// `Node::seqs`.
    pub fn seq_ids(&self) -> &[BString] {
        &self.seq_ids
    }

    pub fn seq_names<'a>(
        &'a self,
        node: &'a Node,
    ) -> impl Iterator<Item = &'a BStr> + 'a {
        node.seqs.iter().map(move |&s| self.seq_ids[s].as_bstr())
    }

    fn clear_edges(&mut self) {
        for node in self.nodes.iter_mut() {
            node.out_edges.clear();
            node.in_edges.clear();
        }
    }

    /// Connect each sequence's nodes in ascending identifier order.
    /// Fails without drawing anything if some sequence has no node.
    pub fn draw_edges(&mut self) -> GFAResult<()> {
        let mut has_node = vec![false; self.seq_ids.len()];
        for node in self.nodes.iter() {
            for &seq in node.seqs.iter() {
                has_node[seq] = true;
            }
        }
        if let Some(seq) = has_node.iter().position(|&found| !found) {
            return Err(GFAError::MissingStartNode(
                self.seq_ids[seq].to_str_lossy().into_owned(),
            ));
        }

        let mut last: Vec<Option<usize>> = vec![None; self.seq_ids.len()];
        for ix in 0..self.nodes.len() {
            let id = ix + 1;
            for s in 0..self.nodes[ix].seqs.len() {
                let seq = self.nodes[ix].seqs[s];
                if let Some(prev) = last[seq] {
                    self.nodes[prev - 1].out_edges.insert(id);
                    self.nodes[ix].in_edges.insert(prev);
                }
                last[seq] = Some(id);
            }
        }
        Ok(())
    }

    /// Pairs of `(predecessor, successor)` where the predecessor has
    /// a single out-edge, to the successor, the successor has no other
    /// in-edge, and both nodes hold the same sequences. Sorted by
    /// predecessor.
    ///
    /// Edges only record sequences that continue, so once gap nodes
    /// are purged a sequence may end at the predecessor or start at
    /// the successor; such pairs are not merged.
    pub fn squashable_pairs(&self) -> Vec<(usize, usize)> {
        self.nodes()
            .filter_map(|(id, node)| {
                if node.out_edges.len() != 1 {
                    return None;
                }
                let next = node.out_edges().next()?;
                let next_node = self.node(next)?;
                if next_node.in_edges.len() == 1 && next_node.seqs == node.seqs {
                    Some((id, next))
                } else {
                    None
                }
            })
            .collect()
    }

    /// A single squashing pass. Every squashable successor is merged
    /// into its predecessor, starting from the highest successor so
    /// that chains collapse into their first node. Gap nodes that are
    /// still empty are then removed, the nodes renumbered, and the
    /// edges redrawn. Returns the number of merges.
    pub fn squash(&mut self) -> GFAResult<usize> {
        let mut pairs = self.squashable_pairs();
        pairs.sort_unstable_by(|a, b| b.1.cmp(&a.1));

        for &(pred, succ) in pairs.iter() {
            let merged = std::mem::take(&mut self.nodes[succ - 1]);
            let pred_node = &mut self.nodes[pred - 1];
            pred_node.base.extend_from_slice(merged.base.as_bytes());
        }

        let before = self.nodes.len();
        self.nodes.retain(|node| !node.is_gap());
        log::debug!(
            "squashed {} node pairs, {} nodes left of {}",
            pairs.len(),
            self.nodes.len(),
            before
        );

        self.clear_edges();
        self.draw_edges()?;
        Ok(pairs.len())
    }

    /// Squash once or until no pair is left, depending on `mode`.
    /// Returns the total number of merges.
    pub fn compact(&mut self, mode: Compaction) -> GFAResult<usize> {
        let mut total = self.squash()?;
        if mode == Compaction::FixedPoint {
            loop {
                let merged = self.squash()?;
                if merged == 0 {
                    break;
                }
                total += merged;
            }
        }
        Ok(total)
    }
}
