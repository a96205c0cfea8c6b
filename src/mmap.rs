use crate::{
    gfa::{Line, GFA},
    parser::{GFAParser, GFAReader},
};

use anyhow::{bail, Result};

use memmap::Mmap;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use bstr::ByteSlice;

/// A GFA file mapped into memory, read one line at a time.
pub struct MmapGFA {
    cursor: std::io::Cursor<Mmap>,
    line_buf: Vec<u8>,
    current_line_len: usize,
    last_buf_offset: usize,
    parser: GFAParser,
}

/// Byte offsets of the record lines in a mapped file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndices {
    pub segments: Vec<usize>,
    pub links: Vec<usize>,
    pub paths: Vec<usize>,
}

impl MmapGFA {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            cursor: std::io::Cursor::new(mmap),
            line_buf: Vec::with_capacity(1024),
            current_line_len: 0,
            last_buf_offset: 0,
            parser: GFAParser::new(),
        })
    }

    pub fn get_ref(&self) -> &[u8] {
        self.cursor.get_ref().as_ref()
    }

    /// Read the next line, including its line ending. Empty at the
    /// end of the file.
    pub fn next_line(&mut self) -> Result<&[u8]> {
        self.line_buf.clear();
        self.last_buf_offset = self.cursor.position() as usize;
        let n_read = self.cursor.read_until(b'\n', &mut self.line_buf)?;
        self.current_line_len = n_read;
        Ok(&self.line_buf[..n_read])
    }

    pub fn read_line_at(&mut self, offset: usize) -> Result<&[u8]> {
        self.cursor.set_position(offset as u64);
        self.next_line()
    }

    /// Scan the whole file for segment, link, and path lines. The
    /// read position is restored afterwards.
    pub fn build_index(&mut self) -> Result<LineIndices> {
        let start_position = self.cursor.position();
        let mut index = LineIndices::default();

        let mut offset = 0;
        for line in self.get_ref().lines_with_terminator() {
            match line.first() {
                Some(b'S') => index.segments.push(offset),
                Some(b'L') => index.links.push(offset),
                Some(b'P') => index.paths.push(offset),
                _ => (),
            }
            offset += line.len();
        }

        self.cursor.set_position(start_position);
        log::debug!(
            "indexed {} segments, {} links, {} paths",
            index.segments.len(),
            index.links.len(),
            index.paths.len()
        );
        Ok(index)
    }

    pub fn current_line(&self) -> &[u8] {
        self.line_buf[..self.current_line_len].trim_end_with(|c| c == '\n' || c == '\r')
    }

    /// The second field of the current line, which names the record
    /// for segments and paths.
    pub fn current_line_name(&self) -> Option<&[u8]> {
        let mut iter = self.current_line().split_str("\t");
        let _lt = iter.next()?;
        iter.next()
    }

    pub fn parse_current_line(&self) -> Result<Line> {
        let line = self.current_line();
        if line.is_empty() {
            bail!("Line at offset {} is empty", self.last_buf_offset);
        }
        Ok(self.parser.parse_gfa_line(line)?)
    }

    /// Parse the whole mapped file into a GFA.
    pub fn parse_gfa(&self) -> Result<GFA> {
        let gfa = GFAReader::new(self.get_ref())?.into_gfa()?;
        Ok(gfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    static GFA_TEXT: &str = "H\tVN:Z:1
#\tsmall graph
S\t1\tACG\tLN:i:3
S\t2\tT\tLN:i:1
L\t1\t+\t2\t+\t0M
P\tp\t1+,2+\t3M,1M
";

    fn mapped() -> (tempfile::NamedTempFile, MmapGFA) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GFA_TEXT.as_bytes()).unwrap();
        file.flush().unwrap();
        let mmap = MmapGFA::new(file.path()).unwrap();
        (file, mmap)
    }

    #[test]
    fn index_and_read_lines() {
        let (_file, mut mmap) = mapped();
        let index = mmap.build_index().unwrap();
        assert_eq!(index.segments.len(), 2);
        assert_eq!(index.links.len(), 1);
        assert_eq!(index.paths.len(), 1);

        mmap.read_line_at(index.segments[1]).unwrap();
        assert_eq!(mmap.current_line(), b"S\t2\tT\tLN:i:1");
        assert_eq!(mmap.current_line_name(), Some(&b"2"[..]));
        match mmap.parse_current_line().unwrap() {
            Line::Segment(seg) => assert_eq!(seg.sequence(), "T"),
            other => panic!("expected a segment, got {:?}", other),
        }

        mmap.read_line_at(index.paths[0]).unwrap();
        assert_eq!(mmap.current_line_name(), Some(&b"p"[..]));
    }

    #[test]
    fn parse_mapped_file() {
        let (_file, mmap) = mapped();
        let gfa = mmap.parse_gfa().unwrap();
        assert_eq!(gfa.version(), Some(1));
        assert_eq!(gfa.comments().len(), 1);
        assert_eq!(gfa.sequence_for_path(b"p").unwrap(), "ACGT");
    }

    #[test]
    fn empty_line_at_end() {
        let (_file, mut mmap) = mapped();
        let len = mmap.get_ref().len();
        assert!(mmap.read_line_at(len).unwrap().is_empty());
        assert!(mmap.parse_current_line().is_err());
    }
}
