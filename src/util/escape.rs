use core::{ascii, fmt, str};

/// Provides a convenient `Debug` implementation for a `u8`.
///
/// The `Debug` impl treats the byte as an ASCII, and emits a human readable
/// representation of it. If the byte isn't ASCII, then it's emitted as a hex
/// escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct DebugByte(pub(crate) u8);

impl fmt::Debug for DebugByte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // 10 bytes is enough to cover any output from ascii::escape_default.
        let mut bytes = [0u8; 10];
        let mut len = 0;
        for (i, mut b) in ascii::escape_default(self.0).enumerate() {
            // capitalize \xab to \xAB
            if i >= 2 && b'a' <= b && b <= b'f' {
                b -= 32;
            }
            bytes[len] = b;
            len += 1;
        }
        match str::from_utf8(&bytes[..len]) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "\\x{:02X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn debug_byte() {
        assert_eq!("a", format!("{:?}", DebugByte(b'a')));
        assert_eq!(".", format!("{:?}", DebugByte(b'.')));
        assert_eq!("\\n", format!("{:?}", DebugByte(b'\n')));
        assert_eq!("\\xFF", format!("{:?}", DebugByte(0xFF)));
    }
}
