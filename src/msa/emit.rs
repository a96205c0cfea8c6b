use bstr::BString;

use crate::{
    cigar::CIGAR,
    gfa::{Link, Orientation, Path, Segment, GFA, SUPPORTED_VERSION},
    parser::GFAResult,
};

use super::{remove_consensus, Alignment, MsaConfig, MsaGraph};

impl MsaGraph {
    /// Emit the graph as GFA: one segment per node named by its
    /// identifier, one `+`/`+` link with a `0M` overlap per edge, and
    /// one forward path per sequence whose overlaps are the lengths
    /// of the visited segments.
    pub fn to_gfa(&self) -> GFAResult<GFA> {
        let mut gfa = GFA::new();
        gfa.set_version(SUPPORTED_VERSION)?;

        for (id, node) in self.nodes() {
            let name = id.to_string();
            gfa.add_segment(Segment::new(name.as_bytes(), node.base())?)?;
            for to in node.out_edges() {
                let to = to.to_string();
                gfa.add_link(Link::new(
                    name.as_bytes(),
                    b"+",
                    to.as_bytes(),
                    b"+",
                    b"0M",
                )?);
            }
        }

        for (seq, seq_id) in self.seq_ids().iter().enumerate() {
            let mut steps = Vec::new();
            let mut overlaps = Vec::new();
            for (id, node) in self.nodes().filter(|(_, n)| n.contains_seq(seq)) {
                steps.push((BString::from(id.to_string()), Orientation::Forward));
                let len = node.base().len();
                let overlap = CIGAR::matches(len)
                    .map_or_else(|| format!("{}M", len), |cg| cg.to_string());
                overlaps.push(BString::from(overlap));
            }
            gfa.add_path(Path::new(seq_id.clone(), steps, overlaps));
        }

        Ok(gfa)
    }
}

/// Convert an alignment into a compacted GFA graph. Consensus rows
/// are deleted from `msa` first.
pub fn msa_to_gfa<A: Alignment + ?Sized>(msa: &mut A, config: &MsaConfig) -> GFAResult<GFA> {
    let removed = remove_consensus(msa, &config.consensus_name);
    if removed > 0 {
        log::info!("removed {} consensus rows", removed);
    }

    let mut graph = MsaGraph::build(msa, config);
    graph.draw_edges()?;
    let merged = graph.compact(config.compaction)?;
    log::info!(
        "compacted alignment of {} sequences into {} nodes and {} edges ({} merges)",
        graph.seq_ids().len(),
        graph.node_count(),
        graph.edge_count(),
        merged
    );

    graph.to_gfa()
}
