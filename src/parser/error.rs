use std::{error, fmt};

use bstr::ByteSlice;

pub type GFAFieldResult<T> = Result<T, ParseFieldError>;
pub type GFAResult<T> = Result<T, GFAError>;

/// The record collections held by a GFA, used when reporting that a
/// collection is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Segment,
    Link,
    Path,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Segment => write!(f, "segments"),
            RecordKind::Link => write!(f, "links"),
            RecordKind::Path => write!(f, "paths"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    /// A bytestring couldn't be parsed as a bytestring, can happen
    /// when the contents aren't UTF8.
    Utf8Error,
    /// A field couldn't be parsed into the correct type
    ParseFromStringError,
    /// A required field was incorrectly formatted. Includes the field
    /// name as defined by the GFA1 format.
    InvalidField(&'static str),
    /// The line has fewer tab-separated fields than its record type
    /// requires.
    MissingFields,
    /// A header line appeared after the first data line.
    UnexpectedHeader,
}

macro_rules! impl_many_from {
    ($to:ty, ($from:ty, $out:expr)) => (
        impl From<$from> for $to {
            fn from(_: $from) -> Self {
                $out
            }
        }
    );
    ($to:ty, ($from:ty, $out:expr), $(($f:ty, $o:expr)),* $(,)?) => (
        impl From<$from> for $to {
            fn from(_: $from) -> Self {
                $out
            }
        }
        impl_many_from!($to, $(($f, $o)),*);
    );
}

impl_many_from!(
    ParseFieldError,
    (std::str::Utf8Error, ParseFieldError::Utf8Error),
    (bstr::Utf8Error, ParseFieldError::Utf8Error),
    (
        std::num::ParseIntError,
        ParseFieldError::ParseFromStringError
    ),
);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::Utf8Error => {
                write!(f, "Failed to parse a bytestring as a UTF-8 string")
            }
            PFE::ParseFromStringError => {
                write!(f, "Failed to parse a field from a string")
            }
            PFE::InvalidField(field) => {
                write!(f, "Failed to parse field `{}`", field)
            }
            PFE::MissingFields => write!(f, "Line is missing required fields"),
            PFE::UnexpectedHeader => {
                write!(f, "Header line found after the first record")
            }
        }
    }
}

impl error::Error for ParseFieldError {}

/// Every failure the crate can report. Construction, container
/// mutation, parsing and MSA conversion all return this type.
#[derive(Debug)]
pub enum GFAError {
    /// A line couldn't be parsed. Includes a variant describing the
    /// error and the problem line.
    MalformedLine(ParseFieldError, String),
    /// The line type was something other than 'S', 'L', 'C', or 'P'.
    UnknownLineType(String),
    /// A segment name contained one of `+-*=` or whitespace.
    InvalidName(String),
    /// An orientation that wasn't `+` or `-`.
    InvalidOrientation(String),
    /// A segment with this name is already held by the GFA.
    DuplicateSegment(String),
    /// A segment was constructed without a sequence. Includes the
    /// segment name.
    EmptySequence(String),
    MissingVersion,
    /// Version 2 is recognised but not supported.
    UnsupportedVersion(u32),
    /// A version that is neither 1 nor 2.
    InvalidVersion(u32),
    /// Tried to set a version when one is already set. Includes the
    /// existing version.
    VersionAlreadySet(u32),
    /// A query for records of a kind that the GFA holds none of.
    EmptyCollection(RecordKind),
    PathNotFound(String),
    /// The path exists but none of its steps contributed sequence.
    EmptyReconstructedSequence(String),
    /// Edge induction found no node for a sequence listed in the
    /// alignment.
    MissingStartNode(String),
    /// An alignment row has a different length from the first row.
    RaggedAlignment(String),
    /// The input stream held no data at all.
    EmptyInput,
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for GFAError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GFAError as E;
        match self {
            E::MalformedLine(field_err, line) => {
                write!(f, "Failed to parse line {}, error: {}", line, field_err)
            }
            E::UnknownLineType(line) => write!(
                f,
                "Line type was not one of 'S', 'L', 'C', 'P': {}",
                line
            ),
            E::InvalidName(name) => write!(
                f,
                "Segment name can't contain +/-/*/= or whitespace: {}",
                name
            ),
            E::InvalidOrientation(o) => {
                write!(f, "Orientation must be either + or -, found `{}`", o)
            }
            E::DuplicateSegment(name) => write!(
                f,
                "Duplicate segment name already present in GFA: {}",
                name
            ),
            E::EmptySequence(name) => {
                write!(f, "Segment {} must have a sequence", name)
            }
            E::MissingVersion => {
                write!(f, "GFA has no version, set it to 1 or 2")
            }
            E::UnsupportedVersion(v) => {
                write!(f, "GFA version {} is currently unsupported", v)
            }
            E::InvalidVersion(v) => {
                write!(f, "GFA version must be 1 or 2, found {}", v)
            }
            E::VersionAlreadySet(v) => {
                write!(f, "GFA already has version {} attached", v)
            }
            E::EmptyCollection(kind) => {
                write!(f, "No {} currently held in GFA", kind)
            }
            E::PathNotFound(name) => write!(f, "Path {} not found in GFA", name),
            E::EmptyReconstructedSequence(name) => {
                write!(f, "Path {} produced an empty sequence", name)
            }
            E::MissingStartNode(seq) => write!(
                f,
                "Node parse error: could not identify start node for {}",
                seq
            ),
            E::RaggedAlignment(name) => write!(
                f,
                "Alignment row {} differs in length from the first row",
                name
            ),
            E::EmptyInput => write!(f, "Input contains no data"),
            E::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for GFAError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl error::Error for GFAError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            GFAError::MalformedLine(err, _) => Some(err),
            GFAError::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl GFAError {
    #[inline]
    pub(crate) fn malformed_line(error: ParseFieldError, line: &[u8]) -> Self {
        let mut dest = String::new();
        line.to_str_lossy_into(&mut dest);
        Self::MalformedLine(error, dest)
    }

    #[inline]
    pub(crate) fn unknown_line_type(line: &[u8]) -> Self {
        Self::UnknownLineType(line.to_str_lossy().into_owned())
    }

    #[inline]
    pub(crate) fn invalid_name(name: &[u8]) -> Self {
        Self::InvalidName(name.to_str_lossy().into_owned())
    }

    #[inline]
    pub(crate) fn invalid_orientation(orient: &[u8]) -> Self {
        Self::InvalidOrientation(orient.to_str_lossy().into_owned())
    }
}
