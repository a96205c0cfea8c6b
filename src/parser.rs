mod error;

pub use self::error::*;

use std::io::BufRead;

use bstr::{BString, ByteSlice};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::{gfa::*, optfields::OptionalFields};

/// Chooses which record kinds a reader keeps. Lines of a disabled
/// kind are skipped without being parsed; header and comment lines
/// are always read.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct GFAParsingConfig {
    pub segments: bool,
    pub links: bool,
    pub containments: bool,
    pub paths: bool,
}

impl GFAParsingConfig {
    pub fn none() -> Self {
        GFAParsingConfig {
            segments: false,
            links: false,
            containments: false,
            paths: false,
        }
    }

    pub fn all() -> Self {
        GFAParsingConfig {
            segments: true,
            links: true,
            containments: true,
            paths: true,
        }
    }

    /// Unknown line types are let through so that the parser can
    /// reject them.
    fn accepts(&self, line_type: u8) -> bool {
        match line_type {
            b'S' => self.segments,
            b'L' => self.links,
            b'C' => self.containments,
            b'P' => self.paths,
            _ => true,
        }
    }
}

impl Default for GFAParsingConfig {
    fn default() -> Self {
        Self::all()
    }
}

/// Turns a single data line into a `Line`.
#[derive(Debug, Clone, Default)]
pub struct GFAParser {
    config: GFAParsingConfig,
}

impl GFAParser {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: GFAParsingConfig) -> Self {
        GFAParser { config }
    }

    pub fn config(&self) -> &GFAParsingConfig {
        &self.config
    }

    /// True if the line should be parsed under the current config
    pub fn filter_line(&self, line: &[u8]) -> bool {
        line.first().map_or(true, |&b| self.config.accepts(b))
    }

    /// Parse a data line, without its trailing newline. Lines with
    /// fewer than three tab-separated fields are malformed; the
    /// record type is taken from the first byte.
    pub fn parse_gfa_line(&self, line: &[u8]) -> GFAResult<Line> {
        let fields: Vec<&[u8]> = line.split_str(b"\t").collect();
        if fields.len() < 3 {
            return Err(GFAError::malformed_line(
                ParseFieldError::MissingFields,
                line,
            ));
        }

        let optionals = |skip: usize| -> GFAResult<OptionalFields> {
            let rest = fields.get(skip..).unwrap_or(&[]);
            OptionalFields::parse(rest)
                .map_err(|err| GFAError::malformed_line(err, line))
        };

        match line[0] {
            b'S' => {
                let segment = Segment::new(fields[1], fields[2])?;
                Ok(Line::Segment(segment.with_optional(optionals(3)?)))
            }
            b'L' => {
                if fields.len() < 6 {
                    return Err(GFAError::malformed_line(
                        ParseFieldError::MissingFields,
                        line,
                    ));
                }
                let link =
                    Link::new(fields[1], fields[2], fields[3], fields[4], fields[5])?;
                Ok(Line::Link(link.with_optional(optionals(6)?)))
            }
            b'P' => {
                let steps = Path::parse_steps(fields[2])?;
                let overlaps = fields
                    .get(3)
                    .map(|o| Path::parse_overlaps(o))
                    .unwrap_or_default();
                let path = Path::new(BString::from(fields[1]), steps, overlaps);
                Ok(Line::Path(path.with_optional(optionals(4)?)))
            }
            b'C' => Ok(Line::Containment(Containment { raw: line.into() })),
            _ => Err(GFAError::unknown_line_type(line)),
        }
    }
}

/// Extract the version number from a header line, e.g. 1 from
/// `H\tVN:Z:1.0`. Header lines without a `VN` tag yield `None`.
pub fn parse_header_version(line: &[u8]) -> GFAResult<Option<u32>> {
    lazy_static! {
        static ref RE_VERSION: Regex =
            Regex::new(r"(?-u)(?:^|\t)VN:Z:([0-9]+)").unwrap();
    }

    let digits = match RE_VERSION.captures(line).and_then(|c| c.get(1)) {
        Some(m) => m.as_bytes(),
        None => return Ok(None),
    };
    let parse = || -> GFAFieldResult<u32> { Ok(digits.to_str()?.parse()?) };
    parse()
        .map(Some)
        .map_err(|err| GFAError::malformed_line(err, line))
}

/// The payload of a comment line: everything after the `#` and one
/// optional tab.
fn comment_payload(line: &[u8]) -> &[u8] {
    let payload = line.get(1..).unwrap_or(&[]);
    payload.strip_prefix(b"\t").unwrap_or(payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    /// Header and comment lines are consumed into the GFA
    ReadingPreamble,
    /// Data lines are handed out one at a time
    ReadingRecords,
}

/// Reads a GFA from a buffered stream. The header and comment lines at
/// the top of the stream are consumed when the reader is created and
/// are available through `gfa()`; records are then read one line at a
/// time with `read_record`, or all at once with `into_gfa`.
pub struct GFAReader<R> {
    reader: R,
    parser: GFAParser,
    state: ReaderState,
    gfa: GFA,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> GFAReader<R> {
    pub fn new(reader: R) -> GFAResult<Self> {
        Self::with_config(reader, GFAParsingConfig::all())
    }

    /// Fails with `EmptyInput` if the stream holds no data, or with
    /// the first error met in the header and comment lines.
    pub fn with_config(reader: R, config: GFAParsingConfig) -> GFAResult<Self> {
        let mut gfa_reader = GFAReader {
            reader,
            parser: GFAParser::with_config(config),
            state: ReaderState::ReadingPreamble,
            gfa: GFA::new(),
            buf: Vec::with_capacity(1024),
            line_no: 0,
        };
        if gfa_reader.peek()?.is_none() {
            return Err(GFAError::EmptyInput);
        }
        gfa_reader.read_preamble()?;
        Ok(gfa_reader)
    }

    /// The GFA holding the header and comments read so far
    pub fn gfa(&self) -> &GFA {
        &self.gfa
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    fn peek(&mut self) -> GFAResult<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    /// Read the next line into the buffer without its line ending.
    /// Returns false at the end of the stream.
    fn next_line(&mut self) -> GFAResult<bool> {
        self.buf.clear();
        let n_read = self.reader.read_until(b'\n', &mut self.buf)?;
        if n_read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(true)
    }

    fn read_preamble(&mut self) -> GFAResult<()> {
        while self.state == ReaderState::ReadingPreamble {
            match self.peek()? {
                Some(b'H') | Some(b'#') => {
                    self.next_line()?;
                    let line = &self.buf;
                    if line.first() == Some(&b'H') {
                        if let Some(version) = parse_header_version(line)? {
                            self.gfa.set_version(version)?;
                        }
                    } else {
                        self.gfa.add_comment(comment_payload(line));
                    }
                }
                _ => self.state = ReaderState::ReadingRecords,
            }
        }
        log::debug!(
            "read {} header and comment lines, version {:?}",
            self.line_no,
            self.gfa.version()
        );
        Ok(())
    }

    /// Returns the next record, or `None` at the end of the stream.
    /// Blank lines and records of kinds disabled in the config are
    /// skipped; comment lines are added to the GFA.
    pub fn read_record(&mut self) -> GFAResult<Option<Line>> {
        if self.state == ReaderState::ReadingPreamble {
            self.read_preamble()?;
        }
        loop {
            if !self.next_line()? {
                return Ok(None);
            }
            match self.buf.first() {
                None => continue,
                Some(b'#') => {
                    self.gfa.add_comment(comment_payload(&self.buf));
                    continue;
                }
                Some(b'H') => {
                    return Err(GFAError::malformed_line(
                        ParseFieldError::UnexpectedHeader,
                        &self.buf,
                    ))
                }
                Some(_) => (),
            }
            if !self.parser.filter_line(&self.buf) {
                continue;
            }
            return self.parser.parse_gfa_line(&self.buf).map(Some);
        }
    }

    /// Read every remaining record into the GFA and return it. The
    /// first error, including a duplicate segment, aborts.
    pub fn into_gfa(mut self) -> GFAResult<GFA> {
        while let Some(line) = self.read_record()? {
            self.gfa.insert_line(line)?;
        }
        log::debug!(
            "parsed {} lines: {} segments, {} links, {} paths",
            self.line_no,
            self.gfa.segment_count(),
            self.gfa.link_count(),
            self.gfa.path_count()
        );
        Ok(self.gfa)
    }
}

impl<R: BufRead> Iterator for GFAReader<R> {
    type Item = GFAResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Parse a complete GFA from a buffered stream.
pub fn parse_gfa<R: BufRead>(reader: R) -> GFAResult<GFA> {
    GFAReader::new(reader)?.into_gfa()
}
