//! Owned, immutable byte-string keys.

use core::fmt;

/// An immutable byte sequence used as a table key.
///
/// Equality is exact byte-wise comparison. Cloning duplicates the storage;
/// the table itself never duplicates a key once it owns it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Box<[u8]>);

impl Key {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Key(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.as_bytes().into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s.into_bytes().into_boxed_slice())
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key(b.into())
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(b: &[u8; N]) -> Self {
        Key(b.as_slice().into())
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key(b.into_boxed_slice())
    }
}

// Lossy: non-UTF-8 bytes print as U+FFFD.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(&self.0) {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => write!(f, "b\"{}\"", self.0.escape_ascii()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn conversions_agree_on_bytes() {
        let a = Key::from("abc");
        let b = Key::from("abc".to_string());
        let c = Key::from(&b"abc"[..]);
        let d = Key::from(b"abc");
        let e = Key::from(vec![b'a', b'b', b'c']);
        let f = Key::new(&b"abc"[..]);
        for k in [&b, &c, &d, &e, &f] {
            assert_eq!(&a, k);
        }
        assert_eq!(a.as_bytes(), b"abc");
        assert_eq!(a.len(), 3);
        assert!(!a.is_empty());
        assert!(Key::from("").is_empty());
    }

    /// Invariant: equality is byte-wise, so a prefix is a different key.
    #[test]
    fn prefix_is_not_equal() {
        assert_ne!(Key::from("ab"), Key::from("abc"));
        assert_ne!(Key::from("a"), Key::from("A"));
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(Key::from("hi").to_string(), "hi");
        assert_eq!(format!("{:?}", Key::from("hi")), "\"hi\"");
        let raw = Key::from(vec![0xff, b'a']);
        assert_eq!(raw.to_string(), "\u{fffd}a");
        assert_eq!(format!("{:?}", raw), "b\"\\xffa\"");
    }
}
