//! Generation options.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Error;

/// Maximum number of digits in a prefix.
pub const MAX_PREFIX_LEN: usize = 8;

/// Where the embedded timestamp comes from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Timestamp {
    /// Read the current time from the generator's time source.
    #[default]
    Now,

    /// Use the given instant, truncated to whole seconds.
    At(SystemTime),

    /// Use the given Unix time in seconds.
    Epoch(u64),

    /// Omit the timestamp field.
    Disabled,
}

impl Timestamp {
    /// Resolves the option into Unix seconds, or `None` if no timestamp is to be embedded.
    pub(crate) fn resolve(self, now: impl FnOnce() -> u64) -> Result<Option<u64>, Error> {
        match self {
            Self::Now => Ok(Some(now())),
            Self::At(t) => t
                .duration_since(UNIX_EPOCH)
                .map(|d| Some(d.as_secs()))
                .map_err(|_| Error::InvalidTimestamp("instant precedes the Unix epoch".into())),
            Self::Epoch(secs) => Ok(Some(secs)),
            Self::Disabled => Ok(None),
        }
    }

    /// Creates an `Epoch` value from fractional Unix seconds, truncating toward zero.
    pub fn from_secs_f64(secs: f64) -> Result<Self, Error> {
        if secs.is_finite() && secs > -1.0 && secs < u64::MAX as f64 {
            Ok(Self::Epoch(secs.trunc() as u64))
        } else {
            Err(Error::InvalidTimestamp(secs.to_string()))
        }
    }
}

impl From<bool> for Timestamp {
    fn from(src: bool) -> Self {
        if src {
            Self::Now
        } else {
            Self::Disabled
        }
    }
}

impl From<u64> for Timestamp {
    fn from(src: u64) -> Self {
        Self::Epoch(src)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(src: SystemTime) -> Self {
        Self::At(src)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Parses textual Unix seconds, either integral or decimal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv9::Timestamp;
    ///
    /// assert_eq!("1700000000".parse(), Ok(Timestamp::Epoch(1_700_000_000)));
    /// assert_eq!("1700000000.9".parse(), Ok(Timestamp::Epoch(1_700_000_000)));
    /// assert!("yesterday".parse::<Timestamp>().is_err());
    /// ```
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.trim();
        if let Ok(secs) = src.parse::<u64>() {
            return Ok(Self::Epoch(secs));
        }
        match src.parse::<f64>() {
            Ok(secs) => Self::from_secs_f64(secs),
            Err(_) => Err(Error::InvalidTimestamp(src.to_owned())),
        }
    }
}

/// Options controlling the layout of a generated identifier.
///
/// # Examples
///
/// ```rust
/// use uuidv9::{GenerateOptions, Timestamp};
///
/// let opts = GenerateOptions::new()
///     .prefix("a1b2c3d4")
///     .timestamp(Timestamp::Disabled)
///     .checksum(true);
/// let id = uuidv9::generate(&opts)?;
/// assert!(id.to_string().starts_with("a1b2c3d4-"));
/// # Ok::<(), uuidv9::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerateOptions {
    /// Up to eight hexadecimal digits placed at the start. Empty means no prefix.
    pub prefix: Option<String>,

    /// Source of the timestamp field that follows the prefix.
    pub timestamp: Timestamp,

    /// Append a two-digit CRC-8 checksum.
    pub checksum: bool,

    /// Mark the identifier as version 9.
    pub version: bool,

    /// Mark the identifier as version 1 (with a timestamp) or 4 (without), with an RFC 4122
    /// variant digit. Takes precedence over `version`.
    pub legacy: bool,
}

impl GenerateOptions {
    /// Creates the default options: current timestamp, no prefix, no markers, no checksum.
    pub const fn new() -> Self {
        Self {
            prefix: None,
            timestamp: Timestamp::Now,
            checksum: false,
            version: false,
            legacy: false,
        }
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the timestamp source.
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Turns the trailing checksum on or off.
    pub const fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Turns the version 9 marker on or off.
    pub const fn version(mut self, version: bool) -> Self {
        self.version = version;
        self
    }

    /// Turns the legacy version 1/4 markers on or off.
    pub const fn legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    /// Returns the validated, lowercased prefix, or an empty string if none is set.
    pub(crate) fn normalized_prefix(&self) -> Result<String, Error> {
        match self.prefix.as_deref() {
            None | Some("") => Ok(String::new()),
            Some(prefix) => {
                validate_prefix(Some(prefix))?;
                Ok(prefix.to_ascii_lowercase())
            }
        }
    }
}

/// Checks that `prefix` is present, at most eight characters long, and hexadecimal.
///
/// # Examples
///
/// ```rust
/// use uuidv9::{validate_prefix, Error};
///
/// assert_eq!(validate_prefix(Some("A1b2")), Ok(()));
/// assert_eq!(validate_prefix(None), Err(Error::MissingPrefix));
/// assert_eq!(validate_prefix(Some("a1b2c3d4e")), Err(Error::PrefixTooLong { len: 9 }));
/// assert!(validate_prefix(Some("zz")).is_err());
/// ```
pub fn validate_prefix(prefix: Option<&str>) -> Result<(), Error> {
    let Some(prefix) = prefix else {
        tracing::debug!("rejected missing prefix");
        return Err(Error::MissingPrefix);
    };
    let len = prefix.chars().count();
    if len > MAX_PREFIX_LEN {
        tracing::debug!(len, "rejected long prefix");
        return Err(Error::PrefixTooLong { len });
    }
    if prefix.is_empty() || !prefix.bytes().all(|c| c.is_ascii_hexdigit()) {
        tracing::debug!(prefix, "rejected non-hexadecimal prefix");
        return Err(Error::PrefixNotHex {
            prefix: prefix.to_owned(),
        });
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Timestamp;
    use serde::{de, Deserializer, Serializer};
    use std::{fmt, time::UNIX_EPOCH};

    impl serde::Serialize for Timestamp {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Now => serializer.serialize_bool(true),
                Self::Disabled => serializer.serialize_bool(false),
                Self::Epoch(secs) => serializer.serialize_u64(*secs),
                Self::At(t) => match t.duration_since(UNIX_EPOCH) {
                    Ok(d) => serializer.serialize_u64(d.as_secs()),
                    Err(_) => Err(serde::ser::Error::custom("instant precedes the Unix epoch")),
                },
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Timestamp {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Timestamp;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a boolean or Unix seconds")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Timestamp::from(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Timestamp::Epoch(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            u64::try_from(value)
                .map(Timestamp::Epoch)
                .map_err(|_| de::Error::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Timestamp::from_secs_f64(value).map_err(de::Error::custom)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse().map_err(de::Error::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Timestamp::Disabled)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Timestamp;
        use crate::GenerateOptions;
        use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

        /// Accepts every timestamp form
        #[test]
        fn accepts_every_timestamp_form() {
            assert_tokens(&Timestamp::Now, &[Token::Bool(true)]);
            assert_tokens(&Timestamp::Disabled, &[Token::Bool(false)]);
            assert_tokens(&Timestamp::Epoch(1_700_000_000), &[Token::U64(1_700_000_000)]);
            assert_de_tokens(&Timestamp::Epoch(42), &[Token::I64(42)]);
            assert_de_tokens(&Timestamp::Epoch(42), &[Token::F64(42.7)]);
            assert_de_tokens(&Timestamp::Epoch(42), &[Token::Str("42")]);
            assert_de_tokens(&Timestamp::Disabled, &[Token::Unit]);
        }

        /// Rejects negative seconds
        #[test]
        fn rejects_negative_seconds() {
            assert_de_tokens_error::<Timestamp>(
                &[Token::I64(-1)],
                "invalid value: integer `-1`, expected a boolean or Unix seconds",
            );
        }

        /// Fills missing option fields with defaults
        #[test]
        fn fills_missing_option_fields_with_defaults() {
            assert_de_tokens(
                &GenerateOptions::new().prefix("a1b2").checksum(true),
                &[
                    Token::Struct {
                        name: "GenerateOptions",
                        len: 2,
                    },
                    Token::Str("prefix"),
                    Token::Some,
                    Token::Str("a1b2"),
                    Token::Str("checksum"),
                    Token::Bool(true),
                    Token::StructEnd,
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_prefix, GenerateOptions, Timestamp};
    use crate::Error;
    use std::time::{Duration, UNIX_EPOCH};

    /// Accepts hexadecimal prefixes of up to eight digits
    #[test]
    fn accepts_hexadecimal_prefixes_of_up_to_eight_digits() {
        for e in ["0", "a1", "A1B2", "a1b2c3d4", "FFFFFFFF"] {
            assert_eq!(validate_prefix(Some(e)), Ok(()), "{e}");
        }
    }

    /// Rejects absent, long, and non-hexadecimal prefixes
    #[test]
    fn rejects_absent_long_and_non_hexadecimal_prefixes() {
        assert_eq!(validate_prefix(None), Err(Error::MissingPrefix));
        assert_eq!(
            validate_prefix(Some("a1b2c3d4e")),
            Err(Error::PrefixTooLong { len: 9 })
        );
        assert_eq!(
            validate_prefix(Some("zzzzzzzzz")),
            Err(Error::PrefixTooLong { len: 9 })
        );
        for e in ["zz", "a1-2", " a1", "0x1", "\u{e9}", ""] {
            assert!(
                matches!(validate_prefix(Some(e)), Err(Error::PrefixNotHex { .. })),
                "{e}"
            );
        }
    }

    /// Lowercases the prefix and skips an empty one
    #[test]
    fn lowercases_the_prefix_and_skips_an_empty_one() {
        let opts = GenerateOptions::new().prefix("A1B2");
        assert_eq!(opts.normalized_prefix().as_deref(), Ok("a1b2"));
        assert_eq!(GenerateOptions::new().normalized_prefix().as_deref(), Ok(""));
        let opts = GenerateOptions::new().prefix("");
        assert_eq!(opts.normalized_prefix().as_deref(), Ok(""));
    }

    /// Resolves each timestamp variant
    #[test]
    fn resolves_each_timestamp_variant() {
        let now = || 0x6512_a3f0;
        assert_eq!(Timestamp::Now.resolve(now), Ok(Some(0x6512_a3f0)));
        assert_eq!(Timestamp::Epoch(7).resolve(now), Ok(Some(7)));
        assert_eq!(Timestamp::Disabled.resolve(now), Ok(None));
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_999);
        assert_eq!(Timestamp::At(at).resolve(now), Ok(Some(1_700_000_000)));
        let before = UNIX_EPOCH - Duration::from_secs(1);
        assert!(Timestamp::At(before).resolve(now).is_err());
    }

    /// Converts from booleans, numbers, instants, and text
    #[test]
    fn converts_from_booleans_numbers_instants_and_text() {
        assert_eq!(Timestamp::from(true), Timestamp::Now);
        assert_eq!(Timestamp::from(false), Timestamp::Disabled);
        assert_eq!(Timestamp::from(42u64), Timestamp::Epoch(42));
        assert_eq!(Timestamp::from(UNIX_EPOCH), Timestamp::At(UNIX_EPOCH));
        assert_eq!(" 42 ".parse(), Ok(Timestamp::Epoch(42)));
        assert_eq!("42.99".parse(), Ok(Timestamp::Epoch(42)));
        assert_eq!("-0.5".parse(), Ok(Timestamp::Epoch(0)));
        assert!("-1".parse::<Timestamp>().is_err());
        assert!("abc".parse::<Timestamp>().is_err());
        assert!("NaN".parse::<Timestamp>().is_err());
        assert!(Timestamp::from_secs_f64(f64::INFINITY).is_err());
    }

    /// Builds options with chained setters
    #[test]
    fn builds_options_with_chained_setters() {
        let opts = GenerateOptions::new()
            .prefix("a1")
            .timestamp(false)
            .checksum(true)
            .version(true)
            .legacy(true);
        assert_eq!(opts.prefix.as_deref(), Some("a1"));
        assert_eq!(opts.timestamp, Timestamp::Disabled);
        assert!(opts.checksum && opts.version && opts.legacy);
        assert_eq!(GenerateOptions::default(), GenerateOptions::new());
    }
}
