use bstr::ByteSlice;

use crate::parser::{GFAError, GFAResult};

/// Bytes that may not appear in a segment name.
const RESERVED: &[u8] = b"+-*= \t\n\r\x0b\x0c";

/// Returns true if the name is non-empty and contains none of `+-*=`
/// or ASCII whitespace.
#[inline]
pub fn is_valid_name(name: &[u8]) -> bool {
    !name.is_empty() && name.find_byteset(RESERVED).is_none()
}

/// Check a segment name, producing an `InvalidName` error naming the
/// rejected input.
#[inline]
pub fn check_name(name: &[u8]) -> GFAResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(GFAError::invalid_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_valid() {
        assert!(is_valid_name(b"1"));
        assert!(is_valid_name(b"seg_12.a"));
        assert!(is_valid_name(b"chr1:100"));
    }

    #[test]
    fn reserved_bytes_are_rejected() {
        let names: [&[u8]; 8] =
            [b"+ - 2", b"a+", b"b-c", b"*", b"x=y", b"a b", b"a\tb", b""];
        for name in names {
            assert!(check_name(name).is_err(), "{:?}", name.as_bstr());
        }
    }
}
