//! The GFA line types, the GFA container, and the queries it
//! supports.

pub mod name;
pub mod orientation;

pub use self::name::*;
pub use self::orientation::*;

use crate::{
    cigar::CIGAR,
    optfields::*,
    parser::{GFAError, GFAResult, RecordKind},
};

use bstr::{BStr, BString, ByteSlice};
use fnv::{FnvHashMap, FnvHashSet};

use std::io::{self, Write};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// The only version this crate can produce and fully handle.
pub const SUPPORTED_VERSION: u32 = 1;

/// A GFA graph: header, comments, and each record kind in insertion
/// order. Segment names are indexed so that duplicates are rejected.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GFA {
    header: Header,
    comments: Vec<BString>,
    segments: Vec<Segment>,
    segment_names: FnvHashSet<BString>,
    links: Vec<Link>,
    paths: Vec<Path>,
}

/// Enum containing the record lines a GFA reader produces. Header and
/// comment lines are handled by the reader itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Segment(Segment),
    Link(Link),
    Containment(Containment),
    Path(Path),
}

impl Line {
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Line::Segment(_) => Some(RecordKind::Segment),
            Line::Link(_) => Some(RecordKind::Link),
            Line::Path(_) => Some(RecordKind::Path),
            Line::Containment(_) => None,
        }
    }
}

impl Line {
    /// Write the record as one GFA line, without a line terminator.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Line::Segment(s) => s.write_to(out),
            Line::Link(l) => l.write_to(out),
            Line::Path(p) => p.write_to(out),
            Line::Containment(c) => c.write_to(out),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

/// Display a record through its byte writer. Bytes that aren't UTF-8
/// are shown lossily; use `write_to` for the exact bytes.
fn fmt_bytes<F>(f: &mut std::fmt::Formatter<'_>, write: F) -> std::fmt::Result
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    write(&mut buf).map_err(|_| std::fmt::Error)?;
    write!(f, "{}", buf.as_bstr())
}

impl GFA {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The version, if one has been set
    pub fn version(&self) -> Option<u32> {
        self.header.version
    }

    /// Attach a version to the GFA. Only version 1 is accepted, and
    /// only if no version has been set before.
    pub fn set_version(&mut self, version: u32) -> GFAResult<()> {
        if let Some(existing) = self.header.version {
            return Err(GFAError::VersionAlreadySet(existing));
        }
        match version {
            SUPPORTED_VERSION => {
                self.header.version = Some(version);
                Ok(())
            }
            2 => Err(GFAError::UnsupportedVersion(version)),
            _ => Err(GFAError::InvalidVersion(version)),
        }
    }

    /// Append a comment; the payload is stored without the `#`
    /// prefix.
    pub fn add_comment<T: Into<BString>>(&mut self, comment: T) {
        self.comments.push(comment.into());
    }

    pub fn comments(&self) -> &[BString] {
        &self.comments
    }

    /// Add a segment, failing if a segment with the same name is
    /// already present.
    pub fn add_segment(&mut self, segment: Segment) -> GFAResult<()> {
        if self.segment_names.contains(&segment.name) {
            return Err(GFAError::DuplicateSegment(
                segment.name.to_str_lossy().into_owned(),
            ));
        }
        self.segment_names.insert(segment.name.clone());
        self.segments.push(segment);
        Ok(())
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// Insert a GFA line into the corresponding collection. Segments
    /// go through `add_segment`, so duplicates are rejected;
    /// containments are not supported and are dropped.
    pub fn insert_line(&mut self, line: Line) -> GFAResult<()> {
        match line {
            Line::Segment(s) => self.add_segment(s)?,
            Line::Link(l) => self.add_link(l),
            Line::Path(p) => self.add_path(p),
            Line::Containment(c) => {
                log::debug!("ignoring unsupported containment line: {}", c);
            }
        }
        Ok(())
    }

    fn non_empty<'a, T>(
        records: &'a [T],
        kind: RecordKind,
    ) -> GFAResult<&'a [T]> {
        if records.is_empty() {
            Err(GFAError::EmptyCollection(kind))
        } else {
            Ok(records)
        }
    }

    /// All segments, or `EmptyCollection` if there are none.
    pub fn segments(&self) -> GFAResult<&[Segment]> {
        Self::non_empty(&self.segments, RecordKind::Segment)
    }

    /// All links, or `EmptyCollection` if there are none.
    pub fn links(&self) -> GFAResult<&[Link]> {
        Self::non_empty(&self.links, RecordKind::Link)
    }

    /// All paths, or `EmptyCollection` if there are none.
    pub fn paths(&self) -> GFAResult<&[Path]> {
        Self::non_empty(&self.paths, RecordKind::Path)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn contains_segment(&self, name: &[u8]) -> bool {
        self.segment_names.contains(name.as_bstr())
    }

    pub fn segment(&self, name: &[u8]) -> Option<&Segment> {
        if !self.contains_segment(name) {
            return None;
        }
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn path(&self, name: &[u8]) -> Option<&Path> {
        self.paths.iter().find(|p| p.path_name == name)
    }

    /// Checks that a version is set and supported, and that the GFA
    /// holds at least one segment.
    pub fn validate(&self) -> GFAResult<()> {
        match self.header.version {
            None => return Err(GFAError::MissingVersion),
            Some(1) | Some(2) => (),
            Some(v) => return Err(GFAError::UnsupportedVersion(v)),
        }
        if self.segments.is_empty() {
            return Err(GFAError::EmptyCollection(RecordKind::Segment));
        }
        Ok(())
    }

    /// Returns the sequence spelled by the named path: the sequences
    /// of its segments, concatenated in path order. Orientations are
    /// not applied.
    pub fn sequence_for_path(&self, path_name: &[u8]) -> GFAResult<BString> {
        self.validate()?;

        let path = self.path(path_name).ok_or_else(|| {
            GFAError::PathNotFound(path_name.to_str_lossy().into_owned())
        })?;

        let seq_map: FnvHashMap<&BStr, &BStr> = self
            .segments
            .iter()
            .map(|s| (s.name.as_bstr(), s.sequence.as_bstr()))
            .collect();

        let mut sequence: Vec<u8> = Vec::new();
        for (name, _orient) in path.iter() {
            match seq_map.get(name) {
                Some(seq) => sequence.extend_from_slice(seq.as_bytes()),
                None => log::warn!(
                    "path {} refers to missing segment {}",
                    path.path_name,
                    name
                ),
            }
        }

        if sequence.is_empty() {
            return Err(GFAError::EmptyReconstructedSequence(
                path_name.to_str_lossy().into_owned(),
            ));
        }
        Ok(BString::from(sequence))
    }

    /// Iterate over the segments, then links, then paths.
    pub fn lines_iter(&self) -> impl Iterator<Item = LineRef<'_>> {
        let segs = self.segments.iter().map(LineRef::Segment);
        let links = self.links.iter().map(LineRef::Link);
        let paths = self.paths.iter().map(LineRef::Path);

        segs.chain(links).chain(paths)
    }
}

/// Borrowed counterpart of `Line`, used when writing a GFA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineRef<'a> {
    Segment(&'a Segment),
    Link(&'a Link),
    Path(&'a Path),
}

impl<'a> LineRef<'a> {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            LineRef::Segment(s) => s.write_to(out),
            LineRef::Link(l) => l.write_to(out),
            LineRef::Path(p) => p.write_to(out),
        }
    }
}

impl<'a> std::fmt::Display for LineRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

/// The header line of a GFA graph. `None` means no version has been
/// set; it is written as `VN:Z:0`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Header {
    pub version: Option<u32>,
}

impl Header {
    pub const RECORD_TYPE: &'static str = "H";
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\tVN:Z:{}",
            Self::RECORD_TYPE,
            self.version.unwrap_or(0)
        )
    }
}

// optional field values are validated to be ASCII, so Display is exact
fn write_optional<W: Write>(optional: &OptionalFields, out: &mut W) -> io::Result<()> {
    if optional.is_empty() {
        Ok(())
    } else {
        write!(out, "\t{}", optional)
    }
}

/// A segment in a GFA graph. The length is always that of the
/// sequence, so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Segment {
    name: BString,
    sequence: BString,
    optional: OptionalFields,
}

impl Segment {
    /// Fails if the name contains `+-*=` or whitespace, or the
    /// sequence is empty.
    pub fn new(name: &[u8], sequence: &[u8]) -> GFAResult<Self> {
        check_name(name)?;
        if sequence.is_empty() {
            return Err(GFAError::EmptySequence(
                name.to_str_lossy().into_owned(),
            ));
        }
        Ok(Segment {
            name: BString::from(name),
            sequence: BString::from(sequence),
            optional: Default::default(),
        })
    }

    pub fn with_optional(mut self, optional: OptionalFields) -> Self {
        self.optional = optional;
        self
    }

    pub fn name(&self) -> &BStr {
        self.name.as_bstr()
    }

    pub fn sequence(&self) -> &BStr {
        self.sequence.as_bstr()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn optional(&self) -> &OptionalFields {
        &self.optional
    }

    pub fn optional_mut(&mut self) -> &mut OptionalFields {
        &mut self.optional
    }
}

impl Segment {
    /// `S\t<name>\t<sequence>\tLN:i:<len>` followed by the optional
    /// fields, name and sequence written byte for byte.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"S\t")?;
        out.write_all(&self.name)?;
        out.write_all(b"\t")?;
        out.write_all(&self.sequence)?;
        write!(out, "\tLN:i:{}", self.len())?;
        write_optional(&self.optional, out)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Link {
    pub from_segment: BString,
    pub from_orient: Orientation,
    pub to_segment: BString,
    pub to_orient: Orientation,
    pub overlap: BString,
    pub optional: OptionalFields,
}

impl Link {
    /// Both segment names must be valid and both orientations `+` or
    /// `-`. The overlap is kept as-is.
    pub fn new(
        from_segment: &[u8],
        from_orient: &[u8],
        to_segment: &[u8],
        to_orient: &[u8],
        overlap: &[u8],
    ) -> GFAResult<Link> {
        check_name(from_segment)?;
        check_name(to_segment)?;
        let from_orient = Orientation::parse(from_orient)?;
        let to_orient = Orientation::parse(to_orient)?;
        Ok(Link {
            from_segment: from_segment.into(),
            from_orient,
            to_segment: to_segment.into(),
            to_orient,
            overlap: overlap.into(),
            optional: Default::default(),
        })
    }

    pub fn with_optional(mut self, optional: OptionalFields) -> Self {
        self.optional = optional;
        self
    }

    /// The overlap parsed as a CIGAR, if it is one
    pub fn overlap_cigar(&self) -> Option<CIGAR> {
        CIGAR::from_bytestring(&self.overlap)
    }
}

impl Link {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"L\t")?;
        out.write_all(&self.from_segment)?;
        write!(out, "\t{}\t", self.from_orient)?;
        out.write_all(&self.to_segment)?;
        write!(out, "\t{}\t", self.to_orient)?;
        out.write_all(&self.overlap)?;
        write_optional(&self.optional, out)
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

/// Containment lines are accepted by the parser but not modelled; the
/// raw line is kept so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Containment {
    pub raw: BString,
}

impl Containment {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.raw)
    }
}

impl std::fmt::Display for Containment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

/// An ordered walk over oriented segments, with one overlap per step
/// or an empty overlap list (written as `*`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Path {
    pub path_name: BString,
    pub segment_names: Vec<(BString, Orientation)>,
    pub overlaps: Vec<BString>,
    pub optional: OptionalFields,
}

impl Path {
    pub fn new(
        path_name: BString,
        segment_names: Vec<(BString, Orientation)>,
        overlaps: Vec<BString>,
    ) -> Self {
        Path {
            path_name,
            segment_names,
            overlaps,
            optional: Default::default(),
        }
    }

    pub fn with_optional(mut self, optional: OptionalFields) -> Self {
        self.optional = optional;
        self
    }

    /// Parse a comma-separated step list such as `11+,12-,13+`. Each
    /// step must end with its orientation.
    pub fn parse_steps(input: &[u8]) -> GFAResult<Vec<(BString, Orientation)>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        input.split_str(b",").map(Self::parse_step).collect()
    }

    fn parse_step(input: &[u8]) -> GFAResult<(BString, Orientation)> {
        match input.split_last() {
            Some((&last, seg)) if !seg.is_empty() => {
                let orient = Orientation::parse([last])?;
                Ok((BString::from(seg), orient))
            }
            _ => Err(GFAError::invalid_orientation(input)),
        }
    }

    /// Parse a comma-separated overlap list; `*` or an empty field
    /// means no overlaps.
    pub fn parse_overlaps(input: &[u8]) -> Vec<BString> {
        if input.is_empty() || input == b"*" {
            Vec::new()
        } else {
            input.split_str(b",").map(BString::from).collect()
        }
    }

    /// Produces an iterator over the segments of the given path,
    /// with a slice to each segment name
    pub fn iter(&self) -> impl Iterator<Item = (&'_ BStr, Orientation)> {
        self.segment_names.iter().map(|(n, o)| (n.as_bstr(), *o))
    }

    /// The overlaps parsed as CIGARs; entries that aren't valid
    /// CIGARs are `None`.
    pub fn overlap_cigars(&self) -> impl Iterator<Item = Option<CIGAR>> + '_ {
        self.overlaps.iter().map(|o| CIGAR::from_bytestring(o))
    }
}

impl Path {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"P\t")?;
        out.write_all(&self.path_name)?;
        out.write_all(b"\t")?;
        for (i, (name, orient)) in self.segment_names.iter().enumerate() {
            if i != 0 {
                out.write_all(b",")?;
            }
            out.write_all(name)?;
            out.write_all(&[orient.plus_minus_as_byte()])?;
        }
        out.write_all(b"\t")?;
        if self.overlaps.is_empty() {
            out.write_all(b"*")?;
        }
        for (i, overlap) in self.overlaps.iter().enumerate() {
            if i != 0 {
                out.write_all(b",")?;
            }
            out.write_all(overlap)?;
        }
        write_optional(&self.optional, out)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_bytes(f, |buf| self.write_to(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, seq: &str) -> Segment {
        Segment::new(name.as_bytes(), seq.as_bytes()).unwrap()
    }

    fn path(name: &str, steps: &str, overlaps: &str) -> Path {
        Path::new(
            name.into(),
            Path::parse_steps(steps.as_bytes()).unwrap(),
            Path::parse_overlaps(overlaps.as_bytes()),
        )
    }

    #[test]
    fn path_iter() {
        use Orientation::*;

        let path = path("14", "11+,12-,13+", "4M,5M");

        let mut path_iter = path.iter();
        assert_eq!(Some(("11".into(), Forward)), path_iter.next());
        assert_eq!(Some(("12".into(), Backward)), path_iter.next());
        assert_eq!(Some(("13".into(), Forward)), path_iter.next());
        assert_eq!(None, path_iter.next());

        let cigars: Vec<_> = path.overlap_cigars().collect();
        assert_eq!(
            cigars,
            vec![CIGAR::matches(4), CIGAR::matches(5)]
        );
    }

    #[test]
    fn path_steps_need_orientation() {
        assert!(matches!(
            Path::parse_steps(b"11+,12"),
            Err(GFAError::InvalidOrientation(_))
        ));
        assert!(matches!(
            Path::parse_steps(b"11+,+"),
            Err(GFAError::InvalidOrientation(_))
        ));
    }

    #[test]
    fn segment_rules() {
        assert!(matches!(
            Segment::new(b"+ - 2", b"ACTG"),
            Err(GFAError::InvalidName(_))
        ));
        assert!(matches!(
            Segment::new(b"1", b""),
            Err(GFAError::EmptySequence(_))
        ));
        assert_eq!(seg("2", "aaaaatgacgt").len(), 11);
    }

    #[test]
    fn link_orientations() {
        assert!(matches!(
            Link::new(b"1", b"x", b"2", b"+", b"0M"),
            Err(GFAError::InvalidOrientation(_))
        ));
        assert!(matches!(
            Link::new(b"1", b"+", b"2", b"x", b"0M"),
            Err(GFAError::InvalidOrientation(_))
        ));
        let link = Link::new(b"1", b"+", b"2", b"-", b"0M").unwrap();
        assert_eq!(link.from_orient, Orientation::Forward);
        assert_eq!(link.to_orient, Orientation::Backward);
        assert_eq!(link.overlap_cigar(), CIGAR::matches(0));
        assert!(matches!(
            Link::new(b"1=", b"+", b"2", b"-", b"0M"),
            Err(GFAError::InvalidName(_))
        ));
    }

    #[test]
    fn print_records() {
        let mut segment = seg("seg1", "GCCCTA");
        assert_eq!(segment.to_string(), "S\tseg1\tGCCCTA\tLN:i:6");
        segment.optional_mut().read_count = Some(3);
        assert_eq!(segment.to_string(), "S\tseg1\tGCCCTA\tLN:i:6\tRC:i:3");

        let link = Link::new(b"13", b"+", b"552", b"-", b"0M").unwrap();
        assert_eq!(link.to_string(), "L\t13\t+\t552\t-\t0M");

        let p = path("path1", "13+,51-,241+", "8M,1M,3M");
        assert_eq!(p.to_string(), "P\tpath1\t13+,51-,241+\t8M,1M,3M");
        assert_eq!(path("p", "1+", "*").to_string(), "P\tp\t1+\t*");

        let mut gfa = GFA::new();
        assert_eq!(gfa.header().to_string(), "H\tVN:Z:0");
        gfa.set_version(1).unwrap();
        assert_eq!(gfa.header().to_string(), "H\tVN:Z:1");
    }

    #[test]
    fn duplicate_segments() {
        let mut gfa = GFA::new();
        gfa.add_segment(seg("1", "actg")).unwrap();
        gfa.add_segment(seg("2", "aaaaatgacgt")).unwrap();

        match gfa.add_segment(seg("1", "actg")) {
            Err(GFAError::DuplicateSegment(name)) => assert_eq!(name, "1"),
            other => panic!("expected DuplicateSegment, got {:?}", other),
        }
        assert_eq!(gfa.segment_count(), 2);
        assert!(gfa.contains_segment(b"2"));
        assert_eq!(gfa.segment(b"2").unwrap().sequence(), "aaaaatgacgt");
        assert!(gfa.segment(b"3").is_none());
    }

    #[test]
    fn versions() {
        let mut gfa = GFA::new();
        assert!(matches!(gfa.set_version(2), Err(GFAError::UnsupportedVersion(2))));
        assert!(matches!(gfa.set_version(3), Err(GFAError::InvalidVersion(3))));
        assert!(matches!(gfa.set_version(0), Err(GFAError::InvalidVersion(0))));
        assert_eq!(gfa.version(), None);
        gfa.set_version(1).unwrap();
        assert!(matches!(
            gfa.set_version(1),
            Err(GFAError::VersionAlreadySet(1))
        ));
        assert_eq!(gfa.version(), Some(1));
    }

    #[test]
    fn validation() {
        let mut gfa = GFA::new();
        assert!(matches!(gfa.validate(), Err(GFAError::MissingVersion)));
        gfa.add_segment(seg("1", "A")).unwrap();
        assert!(matches!(gfa.validate(), Err(GFAError::MissingVersion)));

        let mut gfa = GFA::new();
        gfa.set_version(1).unwrap();
        assert!(matches!(
            gfa.validate(),
            Err(GFAError::EmptyCollection(RecordKind::Segment))
        ));
        gfa.add_segment(seg("1", "A")).unwrap();
        assert!(gfa.validate().is_ok());
    }

    #[test]
    fn empty_collections_are_errors() {
        let mut gfa = GFA::new();
        assert!(matches!(
            gfa.segments(),
            Err(GFAError::EmptyCollection(RecordKind::Segment))
        ));
        assert!(matches!(
            gfa.links(),
            Err(GFAError::EmptyCollection(RecordKind::Link))
        ));
        assert!(matches!(
            gfa.paths(),
            Err(GFAError::EmptyCollection(RecordKind::Path))
        ));

        gfa.add_link(Link::new(b"1", b"+", b"2", b"+", b"0M").unwrap());
        assert_eq!(gfa.links().unwrap().len(), 1);
    }

    #[test]
    fn comments_keep_order() {
        let mut gfa = GFA::new();
        gfa.add_comment("a gfa comment");
        gfa.add_comment("another one");
        gfa.add_comment("a gfa comment");
        assert_eq!(
            gfa.comments(),
            &[
                BString::from("a gfa comment"),
                BString::from("another one"),
                BString::from("a gfa comment")
            ]
        );
    }

    #[test]
    fn reconstruct_path_sequence() {
        let mut gfa = GFA::new();
        gfa.set_version(1).unwrap();
        gfa.add_segment(seg("1", "AC")).unwrap();
        gfa.add_segment(seg("2", "GT")).unwrap();
        gfa.add_path(path("x", "1+,2+", "2M,2M"));
        gfa.add_path(path("y", "2+,1-", "*"));
        gfa.add_path(path("ghost", "7+", "*"));

        assert_eq!(gfa.sequence_for_path(b"x").unwrap(), "ACGT");
        assert_eq!(gfa.sequence_for_path(b"y").unwrap(), "GTAC");
        assert!(matches!(
            gfa.sequence_for_path(b"z"),
            Err(GFAError::PathNotFound(_))
        ));
        assert!(matches!(
            gfa.sequence_for_path(b"ghost"),
            Err(GFAError::EmptyReconstructedSequence(_))
        ));
    }

    #[test]
    fn insert_lines() {
        let mut gfa = GFA::new();
        gfa.insert_line(Line::Segment(seg("1", "A"))).unwrap();
        gfa.insert_line(Line::Containment(Containment {
            raw: "C\t1\t+\t2\t+\t0\t1M".into(),
        }))
        .unwrap();
        gfa.insert_line(Line::Path(path("p", "1+", "1M"))).unwrap();
        assert!(gfa.insert_line(Line::Segment(seg("1", "C"))).is_err());

        let kinds: Vec<_> = gfa.lines_iter().map(|l| l.to_string()).collect();
        assert_eq!(kinds, vec!["S\t1\tA\tLN:i:1", "P\tp\t1+\t1M"]);
    }
}
