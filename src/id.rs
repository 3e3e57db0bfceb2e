use std::{fmt, ops, str};

use crate::validate::{VARIANT_POS, VERSION_POS};

/// Represents a UUIDv9 value: 32 hexadecimal digits held as 16 big-endian bytes.
///
/// The ordering of `Uuid` values matches the lexicographic ordering of their string forms.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal string representation stored in a
    /// stack-allocated structure that can be dereferenced as `str` and
    /// [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv9::Uuid;
    ///
    /// let x = "A1B2C3D4-0190-FE6B-9A7C-0D1E2F3A4B5C".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c");
    /// # Ok::<(), uuidv9::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            let e = *e as usize;
            if let Some(c) = buf_iter.next() {
                *c = DIGITS[e >> 4];
            }
            if let Some(c) = buf_iter.next() {
                *c = DIGITS[e & 15];
            }
            if i == 3 || i == 5 || i == 7 || i == 9 {
                if let Some(c) = buf_iter.next() {
                    *c = b'-';
                }
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }

    /// Returns the version digit, found at index 14 of the string form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let id = uuidv9::generate(&uuidv9::GenerateOptions::new().version(true))?;
    /// assert_eq!(id.version_digit(), '9');
    /// # Ok::<(), uuidv9::Error>(())
    /// ```
    pub fn version_digit(&self) -> char {
        self.digit_at(VERSION_POS)
    }

    /// Returns the variant digit, found at index 19 of the string form.
    pub fn variant_digit(&self) -> char {
        self.digit_at(VARIANT_POS)
    }

    fn digit_at(&self, pos: usize) -> char {
        self.encode().as_bytes()[pos] as char
    }

    /// Returns true if the last two digits are the checksum of the first thirty.
    pub fn has_valid_checksum(&self) -> bool {
        crate::verify_checksum(&self.encode())
    }

    /// Returns true if the version and variant digits follow the UUIDv9 or legacy rules.
    pub fn has_valid_version(&self) -> bool {
        crate::check_version(&self.encode(), None)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUIDv9 representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::Uuid;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [([u8; 16], &'static str)] {
        &[
            ([0x00; 16], "00000000-0000-0000-0000-000000000000"),
            ([0xff; 16], "ffffffff-ffff-ffff-ffff-ffffffffffff"),
            (
                [
                    0xa1, 0xb2, 0xc3, 0xd4, 0x01, 0x90, 0xfe, 0x6b, 0x9a, 0x7c, 0x0d, 0x1e, 0x2f,
                    0x3a, 0x4b, 0x5c,
                ],
                "a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c",
            ),
            (
                [
                    0x65, 0x12, 0xa3, 0xf0, 0x0c, 0xde, 0x1f, 0x5a, 0xb8, 0xe2, 0x71, 0xc0, 0xd4,
                    0xf3, 0xa9, 0xb6,
                ],
                "6512a3f0-0cde-1f5a-b8e2-71c0d4f3a9b6",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (bytes, text) in prepare_cases() {
            let e = Uuid::from(*bytes);
            assert_eq!(Ok(e), text.parse());
            assert_eq!(Ok(e), text.to_uppercase().parse());
            assert_eq!(&e.encode() as &str, *text);
            assert_eq!(&e.to_string(), text);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(e).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c",
            "a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c ",
            "+a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c",
            "a1b2c3d40190fe6b9a7c0d1e2f3a4b5c",
            "a1b2c3d4-0190fe6b-9a7c-0d1e2f3a4b5c",
            "{a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c}",
            "a1b2c3d4-0190-fe 6b-9a7c-0d1e2f3a4b5c",
            "a1b2c3g4-0190-fe6b-9a7c-0d1e2f3a4b5c",
            "a1b2c3d4-0190-fe6b-9a7c_0d1e2f3a4b5c",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err(), "{e}");
            assert!(!crate::is_uuid(e), "{e}");
        }
    }

    /// Reads version and variant digits
    #[test]
    fn reads_version_and_variant_digits() {
        let e: Uuid = "6512a3f0-0cde-1f5a-b8e2-71c0d4f3a9b6".parse().unwrap();
        assert_eq!(e.version_digit(), '1');
        assert_eq!(e.variant_digit(), 'b');
        assert!(e.has_valid_version());

        let e: Uuid = "a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c".parse().unwrap();
        assert_eq!(e.version_digit(), 'f');
        assert!(!e.has_valid_version());
    }

    /// Checks the trailing checksum
    #[test]
    fn checks_the_trailing_checksum() {
        assert!(Uuid::NIL.has_valid_checksum());
        let e: Uuid = "01000000-0000-0000-0000-0000000000b5".parse().unwrap();
        assert!(e.has_valid_checksum());
        assert!(!Uuid::MAX.has_valid_checksum());
    }

    /// Orders values like their string forms
    #[test]
    fn orders_values_like_their_string_forms() {
        let mut values: Vec<Uuid> = prepare_cases().iter().map(|(b, _)| Uuid::from(*b)).collect();
        values.sort();
        let mut texts: Vec<&str> = prepare_cases().iter().map(|(_, t)| *t).collect();
        texts.sort();
        let encoded: Vec<String> = values.iter().map(|e| e.to_string()).collect();
        assert_eq!(encoded, texts);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (bytes, _) in prepare_cases() {
            let e = Uuid::from(*bytes);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
        }
    }
}
