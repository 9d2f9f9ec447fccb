use bstr::ByteSlice;

/// Replaces the escape sequences `\xNN`, `\n`, `\r`, `\t` and `\\` in `s`
/// with the bytes they denote.
///
/// A backslash that doesn't start one of those sequences is copied through
/// unchanged along with whatever follows it.
pub fn unescape(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find_byte(b'\\') {
        out.extend_from_slice(&rest[..i]);
        rest = &rest[i..];
        let (byte, used) = match rest.get(1) {
            Some(b'n') => (b'\n', 2),
            Some(b'r') => (b'\r', 2),
            Some(b't') => (b'\t', 2),
            Some(b'\\') => (b'\\', 2),
            Some(b'x') => match rest.get(2..4).and_then(hex) {
                Some(byte) => (byte, 4),
                None => (b'\\', 1),
            },
            _ => (b'\\', 1),
        };
        out.push(byte);
        rest = &rest[used..];
    }
    out.extend_from_slice(rest);
    out
}

fn hex(digits: &[u8]) -> Option<u8> {
    let s = std::str::from_utf8(digits).ok()?;
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(s, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn hex_escapes() {
        assert_eq!(b"\x00".to_vec(), unescape(br"\x00"));
        assert_eq!(b"a\xFFb".to_vec(), unescape(br"a\xffb"));
        assert_eq!(br"\xZ1".to_vec(), unescape(br"\xZ1"));
        assert_eq!(br"\x+1".to_vec(), unescape(br"\x+1"));
        assert_eq!(br"\xA".to_vec(), unescape(br"\xA"));
    }

    #[test]
    fn control_escapes() {
        assert_eq!(b"a\nb\tc\r".to_vec(), unescape(br"a\nb\tc\r"));
        assert_eq!(br"\".to_vec(), unescape(br"\\"));
        assert_eq!(br"\q".to_vec(), unescape(br"\q"));
        assert_eq!(br"ab\".to_vec(), unescape(br"ab\"));
    }
}
