//! CIGAR strings as used in link and path overlaps.

use bytemuck::{Contiguous, Pod, Zeroable};

use nom::IResult;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(
    Contiguous, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum CIGAROp {
    M = 0,
    I = 1,
    D = 2,
    N = 3,
    S = 4,
    H = 5,
    P = 6,
    E = 7,
    X = 8,
}

/// Operation symbols, indexed by the integer value of the op
const OP_SYMBOLS: [u8; 9] = *b"MIDNSHP=X";

impl CIGAROp {
    pub fn from_symbol(sym: u8) -> Option<Self> {
        let ix = OP_SYMBOLS.iter().position(|&s| s == sym)?;
        CIGAROp::from_integer(ix as u8)
    }

    pub fn symbol(self) -> u8 {
        OP_SYMBOLS[self.into_integer() as usize]
    }

    /// Ops that consume both the reference and the query
    #[inline]
    pub fn is_match_or_mismatch(&self) -> bool {
        matches!(self, CIGAROp::M | CIGAROp::E | CIGAROp::X)
    }
}

impl std::fmt::Display for CIGAROp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(self.symbol()))
    }
}

/// One CIGAR op and its length packed in a u32, the length in the
/// high 28 bits.
#[repr(transparent)]
#[derive(
    Zeroable, Pod, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CIGARPair(u32);

const MAX_LEN: u32 = (1 << 28) - 1;

#[allow(clippy::len_without_is_empty)]
impl CIGARPair {
    /// `None` if the length doesn't fit in 28 bits.
    pub fn new(len: u32, op: CIGAROp) -> Option<Self> {
        if len <= MAX_LEN {
            Some(CIGARPair((len << 4) | op.into_integer() as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.0 >> 4
    }

    #[inline]
    pub fn op(&self) -> CIGAROp {
        // pairs are only built by `new`, from a valid op
        CIGAROp::from_integer((self.0 & 0xF) as u8).unwrap_or(CIGAROp::M)
    }

    pub fn into_pair(&self) -> (u32, CIGAROp) {
        (self.len(), self.op())
    }
}

impl From<CIGARPair> for u32 {
    fn from(cg: CIGARPair) -> Self {
        bytemuck::cast(cg)
    }
}

impl std::fmt::Display for CIGARPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len(), self.op())
    }
}

/// Overlaps in links and paths are stored as opaque bytestrings; this
/// type is used when they need to be built or inspected.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CIGAR(pub Vec<CIGARPair>);

impl CIGAR {
    /// `None` if any length doesn't fit in a pair.
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u32, CIGAROp)>,
    {
        pairs
            .into_iter()
            .map(|(len, op)| CIGARPair::new(len, op))
            .collect::<Option<Vec<_>>>()
            .map(CIGAR)
    }

    /// The overlap of a segment with itself, `<len>M`. Lengths that
    /// don't fit in 28 bits are `None`.
    pub fn matches(len: usize) -> Option<Self> {
        let len = u32::try_from(len).ok()?;
        Self::from_pairs(std::iter::once((len, CIGAROp::M)))
    }

    fn parse_pair(input: &[u8]) -> IResult<&[u8], CIGARPair> {
        use nom::{
            bytes::complete::take,
            character::complete::digit1,
            combinator::{map, map_opt, verify},
            sequence::pair,
        };
        let len = map_opt(digit1, |bs: &[u8]| {
            std::str::from_utf8(bs).ok()?.parse::<u32>().ok()
        });
        let op = map_opt(take(1usize), |b: &[u8]| CIGAROp::from_symbol(b[0]));
        map(pair(verify(len, |l: &u32| *l <= MAX_LEN), op), |(len, op)| {
            CIGARPair((len << 4) | op.into_integer() as u32)
        })(input)
    }

    pub(crate) fn parser_bytestring(i: &[u8]) -> IResult<&[u8], Self> {
        nom::combinator::map(nom::multi::many1(Self::parse_pair), CIGAR)(i)
    }

    /// Parse a CIGAR object from an ASCII byte slice. The whole input
    /// must be consumed, so `*` and other placeholders yield `None`.
    pub fn from_bytestring(i: &[u8]) -> Option<Self> {
        match Self::parser_bytestring(i) {
            Ok((rest, cg)) if rest.is_empty() => Some(cg),
            _ => None,
        }
    }

    /// Sum of the lengths of all ops
    pub fn len(&self) -> usize {
        self.iter().map(|(len, _)| len as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, CIGAROp)> + '_ {
        self.0.iter().map(CIGARPair::into_pair)
    }

    /// Number of bases covered by matches and mismatches
    pub fn aligned_len(&self) -> usize {
        self.iter()
            .filter(|(_, op)| op.is_match_or_mismatch())
            .map(|(len, _)| len as usize)
            .sum()
    }
}

impl std::fmt::Display for CIGAR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|pair| write!(f, "{}", pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CIGAROp::*;

    #[test]
    fn symbols_match_ops() {
        for sym in b"MIDNSHP=X".iter() {
            let op = CIGAROp::from_symbol(*sym).unwrap();
            assert_eq!(op.symbol(), *sym);
        }
        assert_eq!(CIGAROp::from_symbol(b'='), Some(E));
        assert_eq!(CIGAROp::from_symbol(b'Q'), None);
    }

    #[test]
    fn parse_overlap() {
        let cigar = CIGAR::from_bytestring(b"10M2I3=1X").unwrap();
        assert_eq!(
            cigar.iter().collect::<Vec<_>>(),
            vec![(10, M), (2, I), (3, E), (1, X)]
        );
        assert_eq!(cigar.to_string(), "10M2I3=1X");
    }

    #[test]
    fn partial_parse_leaves_rest() {
        let (rest, cigar) = CIGAR::parser_bytestring(b"20M12D93  X").unwrap();
        assert_eq!(rest, b"93  X");
        assert_eq!(cigar, CIGAR::from_pairs(vec![(20, M), (12, D)]).unwrap());

        assert!(CIGAR::parser_bytestring(b"M20").is_err());
        assert!(CIGAR::parser_bytestring(b"20").is_err());
        assert!(CIGAR::parser_bytestring(b"").is_err());
    }

    #[test]
    fn placeholders_are_not_cigars() {
        assert_eq!(CIGAR::from_bytestring(b"*"), None);
        assert_eq!(CIGAR::from_bytestring(b"4M "), None);
        assert_eq!(CIGAR::from_bytestring(b"0M"), CIGAR::matches(0));
        assert_eq!(CIGAR::from_bytestring(b"268435456M"), None);
    }

    #[test]
    fn match_lengths() {
        let cigar = CIGAR::from_bytestring(b"3M2I4=1X").unwrap();
        assert_eq!(cigar.len(), 10);
        assert_eq!(cigar.aligned_len(), 8);
        assert_eq!(CIGAR::matches(7).unwrap().to_string(), "7M");
        assert_eq!(CIGAR::matches(1 << 28), None);
        assert_eq!(u32::from(CIGARPair::new(7, M).unwrap()), 7 << 4);
    }
}
