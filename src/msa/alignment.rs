use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bstr::{io::BufReadExt, BStr, BString, ByteSlice};

use crate::parser::{GFAError, GFAResult};

/// Name of the synthetic row that alignment tools append and that
/// must not become part of the graph.
pub const CONSENSUS_NAME: &str = "consensus";

/// A multiple sequence alignment seen as a matrix of bases, one row
/// per sequence. Every row has `columns()` bases.
pub trait Alignment {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn row_name(&self, row: usize) -> &BStr;

    fn base(&self, row: usize, column: usize) -> u8;

    fn delete_row(&mut self, row: usize);
}

/// Delete every row with the given name. Returns how many rows were
/// removed.
pub fn remove_consensus<A: Alignment + ?Sized>(msa: &mut A, name: &[u8]) -> usize {
    let mut removed = 0;
    for row in (0..msa.rows()).rev() {
        if msa.row_name(row) == name {
            msa.delete_row(row);
            removed += 1;
        }
    }
    removed
}

/// An alignment held in memory, as read from an aligned FASTA file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentMatrix {
    names: Vec<BString>,
    rows: Vec<BString>,
}

impl AlignmentMatrix {
    /// Build an alignment from (name, aligned sequence) pairs. All
    /// sequences must have the same length.
    pub fn new<I, N, S>(rows: I) -> GFAResult<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<BString>,
        S: Into<BString>,
    {
        let mut msa = AlignmentMatrix::default();
        for (name, seq) in rows {
            msa.push_row(name.into(), seq.into())?;
        }
        Ok(msa)
    }

    fn push_row(&mut self, name: BString, seq: BString) -> GFAResult<()> {
        if let Some(first) = self.rows.first() {
            if first.len() != seq.len() {
                return Err(GFAError::RaggedAlignment(
                    name.to_str_lossy().into_owned(),
                ));
            }
        }
        self.names.push(name);
        self.rows.push(seq);
        Ok(())
    }

    /// Parse an aligned FASTA stream. The record name is the header
    /// up to the first whitespace; sequence lines are concatenated.
    pub fn from_fasta<R: BufRead>(reader: R) -> GFAResult<Self> {
        let mut msa = AlignmentMatrix::default();
        let mut current: Option<(BString, Vec<u8>)> = None;

        for line in reader.byte_lines() {
            let line = line?;
            let line = line.trim_end_with(|c| c.is_ascii_whitespace());
            if let Some(header) = line.strip_prefix(b">") {
                if let Some((name, seq)) = current.take() {
                    msa.push_row(name, seq.into())?;
                }
                let name = header.fields_with(|c| c.is_whitespace()).next().unwrap_or(b"");
                current = Some((BString::from(name), Vec::new()));
            } else if let Some((_, seq)) = current.as_mut() {
                seq.extend(line.iter().filter(|b| !b.is_ascii_whitespace()));
            }
        }
        if let Some((name, seq)) = current {
            msa.push_row(name, seq.into())?;
        }
        Ok(msa)
    }

    pub fn row(&self, row: usize) -> &BStr {
        self.rows[row].as_bstr()
    }

    pub fn names(&self) -> &[BString] {
        &self.names
    }
}

impl Alignment for AlignmentMatrix {
    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn columns(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    fn row_name(&self, row: usize) -> &BStr {
        self.names[row].as_bstr()
    }

    fn base(&self, row: usize, column: usize) -> u8 {
        self.rows[row][column]
    }

    fn delete_row(&mut self, row: usize) {
        self.names.remove(row);
        self.rows.remove(row);
    }
}

/// Read an aligned FASTA file into memory.
pub fn read_fasta_msa<P: AsRef<Path>>(path: P) -> GFAResult<AlignmentMatrix> {
    let file = File::open(path)?;
    AlignmentMatrix::from_fasta(BufReader::new(file))
}
