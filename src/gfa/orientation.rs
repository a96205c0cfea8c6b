#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::parser::{GFAError, GFAResult};

/// Represents segment orientation/strand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Orientation {
    Forward,
    Backward,
}

impl Orientation {
    /// Parse an orientation from a single-element, where + is
    /// Forward, - is Backward
    #[inline]
    pub fn from_bytes_plus_minus<T: AsRef<[u8]>>(bs: T) -> Option<Self> {
        match bs.as_ref() {
            b"+" => Some(Orientation::Forward),
            b"-" => Some(Orientation::Backward),
            _ => None,
        }
    }

    /// Like `from_bytes_plus_minus`, but reports the offending bytes
    /// as an `InvalidOrientation` error.
    #[inline]
    pub fn parse<T: AsRef<[u8]>>(bs: T) -> GFAResult<Self> {
        let bs = bs.as_ref();
        Self::from_bytes_plus_minus(bs)
            .ok_or_else(|| GFAError::invalid_orientation(bs))
    }

    #[inline]
    pub fn plus_minus_as_byte(&self) -> u8 {
        match self {
            Self::Forward => b'+',
            Self::Backward => b'-',
        }
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        !bool::from(*self)
    }
}

/// Default orientation is forward
impl Default for Orientation {
    #[inline]
    fn default() -> Orientation {
        Orientation::Forward
    }
}

/// Forward is true, backward is false
impl From<Orientation> for bool {
    #[inline]
    fn from(o: Orientation) -> bool {
        match o {
            Orientation::Forward => true,
            Orientation::Backward => false,
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = GFAError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::parse(s.as_bytes())
    }
}

/// Display follows the GFA format, mapping `Forward` to "+", `Backward`
/// to "-".
///
/// # Examples
///
/// ```
/// use msagfa::gfa::Orientation as O;
///
/// assert_eq!(&format!("{}", O::Forward), "+");
/// assert_eq!(&format!("{}", O::Backward), "-");
/// ```
impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(self.plus_minus_as_byte()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plus_minus() {
        assert_eq!(Orientation::parse(b"+").unwrap(), Orientation::Forward);
        assert_eq!(Orientation::parse(b"-").unwrap(), Orientation::Backward);
        assert!("-".parse::<Orientation>().unwrap().is_reverse());
    }

    #[test]
    fn reject_other_bytes() {
        let bad_inputs: [&[u8]; 4] = [b"x", b"", b"++", b">"];
        for bad in bad_inputs {
            match Orientation::parse(bad) {
                Err(GFAError::InvalidOrientation(_)) => (),
                other => panic!("expected InvalidOrientation, got {:?}", other),
            }
        }
    }
}
