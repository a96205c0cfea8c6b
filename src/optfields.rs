use bstr::{BString, ByteSlice};

use lazy_static::lazy_static;
use regex::bytes::Regex;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::parser::{GFAFieldResult, ParseFieldError};

/// The optional field tags this crate understands. Fields with any
/// other tag are dropped when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptTag {
    /// Read count
    RC,
    /// Fragment count
    FC,
    /// k-mer count
    KC,
    /// SHA-256 checksum of the sequence
    SH,
    /// URI or local file-system path of the sequence
    UR,
}

impl OptTag {
    /// Catalogue order, which is also the order fields are printed in
    pub const ALL: [OptTag; 5] =
        [OptTag::RC, OptTag::FC, OptTag::KC, OptTag::SH, OptTag::UR];

    pub fn from_bytes(tag: &[u8]) -> Option<Self> {
        match tag {
            b"RC" => Some(OptTag::RC),
            b"FC" => Some(OptTag::FC),
            b"KC" => Some(OptTag::KC),
            b"SH" => Some(OptTag::SH),
            b"UR" => Some(OptTag::UR),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptTag::RC => "RC",
            OptTag::FC => "FC",
            OptTag::KC => "KC",
            OptTag::SH => "SH",
            OptTag::UR => "UR",
        }
    }

    /// The GFA type character values of this tag are written with
    pub fn type_byte(&self) -> u8 {
        match self {
            OptTag::RC | OptTag::FC | OptTag::KC => b'i',
            OptTag::SH => b'H',
            OptTag::UR => b'Z',
        }
    }
}

/// The recognised optional fields of a segment, link, or path. Each
/// field is independently present or absent; an explicit `RC:i:0` is
/// `Some(0)`, not the same as a missing read count.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct OptionalFields {
    pub read_count: Option<i64>,
    pub fragment_count: Option<i64>,
    pub kmer_count: Option<i64>,
    /// Hex digits, stored as written
    pub checksum: Option<BString>,
    pub uri: Option<BString>,
}

fn parse_int(tag: OptTag, value: &[u8]) -> GFAFieldResult<i64> {
    lazy_static! {
        static ref RE_INT: Regex = Regex::new(r"(?-u)^[-+]?[0-9]+$").unwrap();
    }
    if !RE_INT.is_match(value) {
        return Err(ParseFieldError::InvalidField(tag.as_str()));
    }
    let parsed = value.to_str()?.parse()?;
    Ok(parsed)
}

fn parse_bytes(tag: OptTag, value: &[u8]) -> GFAFieldResult<BString> {
    lazy_static! {
        static ref RE_BYTES: Regex =
            Regex::new(r"(?-u)^[0-9A-Fa-f]+$").unwrap();
    }
    if RE_BYTES.is_match(value) {
        Ok(value.into())
    } else {
        Err(ParseFieldError::InvalidField(tag.as_str()))
    }
}

fn parse_string(tag: OptTag, value: &[u8]) -> GFAFieldResult<BString> {
    lazy_static! {
        static ref RE_STRING: Regex = Regex::new(r"(?-u)^[ !-~]+$").unwrap();
    }
    if RE_STRING.is_match(value) {
        Ok(value.into())
    } else {
        Err(ParseFieldError::InvalidField(tag.as_str()))
    }
}

impl OptionalFields {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a sequence of `<TAG>:<TYPE>:<VALUE>` fields. Unknown
    /// tags are skipped; a known tag with the wrong type or an
    /// unparseable value is an error.
    pub fn parse<T>(input: T) -> GFAFieldResult<Self>
    where
        T: IntoIterator,
        T::Item: AsRef<[u8]>,
    {
        let mut fields = Self::new();
        for field in input {
            fields.parse_field(field.as_ref())?;
        }
        Ok(fields)
    }

    /// Parse a single field into `self`, overwriting any previous
    /// value of the same tag.
    pub fn parse_field(&mut self, input: &[u8]) -> GFAFieldResult<()> {
        let tag = match input.get(0..2).and_then(OptTag::from_bytes) {
            Some(tag) => tag,
            None => return Ok(()),
        };

        if input.len() < 5 || input[2] != b':' || input[4] != b':' {
            return Err(ParseFieldError::InvalidField(tag.as_str()));
        }
        if input[3] != tag.type_byte() {
            return Err(ParseFieldError::InvalidField(tag.as_str()));
        }

        let value = &input[5..];
        match tag {
            OptTag::RC => self.read_count = Some(parse_int(tag, value)?),
            OptTag::FC => self.fragment_count = Some(parse_int(tag, value)?),
            OptTag::KC => self.kmer_count = Some(parse_int(tag, value)?),
            OptTag::SH => self.checksum = Some(parse_bytes(tag, value)?),
            OptTag::UR => self.uri = Some(parse_string(tag, value)?),
        }
        Ok(())
    }

    /// True if no recognised field is set
    pub fn is_empty(&self) -> bool {
        OptTag::ALL.iter().all(|&tag| !self.has_field(tag))
    }

    pub fn has_field(&self, tag: OptTag) -> bool {
        match tag {
            OptTag::RC => self.read_count.is_some(),
            OptTag::FC => self.fragment_count.is_some(),
            OptTag::KC => self.kmer_count.is_some(),
            OptTag::SH => self.checksum.is_some(),
            OptTag::UR => self.uri.is_some(),
        }
    }

    fn write_field(
        &self,
        tag: OptTag,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}:", tag.as_str(), char::from(tag.type_byte()))?;
        match tag {
            OptTag::RC => write!(f, "{}", self.read_count.unwrap_or_default()),
            OptTag::FC => {
                write!(f, "{}", self.fragment_count.unwrap_or_default())
            }
            OptTag::KC => write!(f, "{}", self.kmer_count.unwrap_or_default()),
            OptTag::SH => match &self.checksum {
                Some(x) => write!(f, "{}", x),
                None => Ok(()),
            },
            OptTag::UR => match &self.uri {
                Some(x) => write!(f, "{}", x),
                None => Ok(()),
            },
        }
    }
}

/// The Display implementation writes the set fields, tab-separated,
/// in catalogue order; it can be parsed back to an equal value.
impl std::fmt::Display for OptionalFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = OptTag::ALL.iter().filter(|&&tag| self.has_field(tag));
        for (i, &tag) in set.enumerate() {
            if i != 0 {
                write!(f, "\t")?;
            }
            self.write_field(tag, f)?;
        }
        Ok(())
    }
}
