use std::io::Write;

use crate::{
    gfa::{Line, LineRef, GFA},
    parser::{GFAError, GFAResult},
};

/// Writes GFA lines to a byte stream, one record per line.
pub struct GFAWriter<W: Write> {
    inner: W,
}

impl<W: Write> GFAWriter<W> {
    pub fn new(inner: W) -> Self {
        GFAWriter { inner }
    }

    /// Write the header line followed by every comment, each as
    /// `#\t<comment>` with the comment bytes unchanged.
    pub fn write_header(&mut self, gfa: &GFA) -> GFAResult<()> {
        writeln!(self.inner, "{}", gfa.header())?;
        for comment in gfa.comments() {
            self.inner.write_all(b"#\t")?;
            self.inner.write_all(comment)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn write_line(&mut self, line: &Line) -> GFAResult<()> {
        line.write_to(&mut self.inner)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Write a complete GFA: header, comments, segments, links, and
    /// paths. Nothing is written if the GFA fails validation.
    pub fn write_gfa(&mut self, gfa: &GFA) -> GFAResult<()> {
        gfa.validate().map_err(|err| {
            log::error!("GFA validation failed, can't write GFA content: {}", err);
            err
        })?;
        self.write_header(gfa)?;
        for line in gfa.lines_iter() {
            self.write_line_ref(line)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    fn write_line_ref(&mut self, line: LineRef<'_>) -> GFAResult<()> {
        line.write_to(&mut self.inner)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Render a complete GFA as bytes, exactly as `write_gfa` would.
pub fn gfa_bytes(gfa: &GFA) -> GFAResult<Vec<u8>> {
    let mut writer = GFAWriter::new(Vec::new());
    writer.write_gfa(gfa)?;
    Ok(writer.into_inner())
}

/// Render a complete GFA as a string. Fails with an `InvalidData`
/// IO error if any name, sequence, or comment isn't UTF-8.
pub fn gfa_string(gfa: &GFA) -> GFAResult<String> {
    String::from_utf8(gfa_bytes(gfa)?).map_err(|err| {
        GFAError::IOError(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfa::{Link, Path, Segment};
    use crate::parser::{parse_gfa, RecordKind};
    use bstr::BString;
    use std::io::Cursor;

    fn small_gfa() -> GFA {
        let mut gfa = GFA::new();
        gfa.set_version(1).unwrap();
        gfa.add_comment("a gfa comment");
        gfa.add_segment(Segment::new(b"1", b"ACTG").unwrap()).unwrap();
        gfa.add_segment(Segment::new(b"2", b"GA").unwrap()).unwrap();
        gfa.add_link(Link::new(b"1", b"+", b"2", b"-", b"0M").unwrap());
        gfa.add_path(Path::new(
            "p1".into(),
            Path::parse_steps(b"1+,2-").unwrap(),
            vec!["4M".into(), "2M".into()],
        ));
        gfa
    }

    #[test]
    fn write_whole_gfa() {
        let text = gfa_string(&small_gfa()).unwrap();
        assert_eq!(
            text,
            "H\tVN:Z:1
#\ta gfa comment
S\t1\tACTG\tLN:i:4
S\t2\tGA\tLN:i:2
L\t1\t+\t2\t-\t0M
P\tp1\t1+,2-\t4M,2M
"
        );
    }

    #[test]
    fn invalid_gfa_writes_nothing() {
        let mut writer = GFAWriter::new(Vec::new());
        assert!(matches!(
            writer.write_gfa(&GFA::new()),
            Err(GFAError::MissingVersion)
        ));

        let mut gfa = GFA::new();
        gfa.set_version(1).unwrap();
        assert!(matches!(
            writer.write_gfa(&gfa),
            Err(GFAError::EmptyCollection(RecordKind::Segment))
        ));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn round_trip() {
        let input = "H\tVN:Z:1
#\tcomment one
#\tcomment two
S\t1\tCAAATAAG\tLN:i:8\tRC:i:12\tSH:H:0AF3
S\t2\tA\tLN:i:1\tUR:Z:file:///seqs/a.fa
S\t3\tG\tLN:i:1
L\t1\t+\t2\t+\t0M\tFC:i:2
L\t1\t+\t3\t-\t1M1D
L\t1\t+\t3\t-\t1M1D
P\tx\t1+,2+\t8M,1M
P\ty\t1+,3-\t*\tKC:i:0
";
        let gfa = parse_gfa(Cursor::new(input)).unwrap();
        assert_eq!(gfa_string(&gfa).unwrap(), input);
    }

    #[test]
    fn non_utf8_bytes_survive_round_trip() {
        let input: &[u8] = b"H\tVN:Z:1\n#\tlat\xe9n1\nS\ts\xff\tAC\tLN:i:2\nP\tp\xfe\ts\xff+\t*\n";
        let gfa = parse_gfa(Cursor::new(input)).unwrap();
        assert_eq!(gfa.comments(), &[BString::from(&b"lat\xe9n1"[..])]);
        assert!(gfa.contains_segment(b"s\xff"));

        assert_eq!(gfa_bytes(&gfa).unwrap(), input.to_vec());
        assert!(matches!(gfa_string(&gfa), Err(GFAError::IOError(_))));
    }

    #[test]
    fn write_single_lines() {
        let mut writer = GFAWriter::new(Vec::new());
        let seg = Segment::new(b"7", b"TT").unwrap();
        writer.write_line(&Line::Segment(seg)).unwrap();
        assert_eq!(writer.into_inner(), b"S\t7\tTT\tLN:i:2\n".to_vec());
    }
}
