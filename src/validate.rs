//! Validation predicates over the 8-4-4-4-12 string form.
//!
//! Every predicate answers `false` for malformed input instead of failing. Positions are read
//! with bounds-checked access, so short strings simply do not match.

/// Index of the version digit in the hyphenated form.
pub(crate) const VERSION_POS: usize = 14;

/// Index of the variant digit in the hyphenated form.
pub(crate) const VARIANT_POS: usize = 19;

/// Returns true if `uuid` has the shape `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`, where each `X` is
/// a hexadecimal digit of either case.
///
/// # Examples
///
/// ```rust
/// use uuidv9::is_uuid;
///
/// assert!(is_uuid("a1b2c3d4-0190-fe6b-9a7c-0d1e2f3a4b5c"));
/// assert!(!is_uuid("not-a-real-uuid"));
/// ```
pub fn is_uuid(uuid: &str) -> bool {
    let bytes = uuid.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => *c == b'-',
            _ => c.is_ascii_hexdigit(),
        })
}

/// Recomputes the checksum over the first 30 digits and compares it with the last two digits.
///
/// The comparison is case-sensitive: the recomputed checksum is lowercase, so an uppercased
/// identifier does not verify unless the caller normalizes it first.
///
/// # Examples
///
/// ```rust
/// let id = uuidv9::generate(&uuidv9::GenerateOptions::new().checksum(true))?;
/// assert!(uuidv9::verify_checksum(&id.to_string()));
/// # Ok::<(), uuidv9::Error>(())
/// ```
pub fn verify_checksum(uuid: &str) -> bool {
    let joined: String = uuid.chars().filter(|c| *c != '-').take(30).collect();
    let Some(expected) = uuid.get(34..36) else {
        return false;
    };
    crate::calc_checksum(&joined).is_some_and(|crc| crc == expected)
}

/// Checks the version and variant digits.
///
/// Accepts version `9` with any variant, or versions `1` and `4` with a variant digit in
/// `[89abAB]`. When `version` is given, the version digit must also equal it literally.
///
/// # Examples
///
/// ```rust
/// use uuidv9::check_version;
///
/// assert!(check_version("a1b2c3d4-0190-9e6b-1a7c-0d1e2f3a4b5c", None));
/// assert!(check_version("a1b2c3d4-0190-4e6b-ba7c-0d1e2f3a4b5c", Some('4')));
/// assert!(!check_version("a1b2c3d4-0190-4e6b-1a7c-0d1e2f3a4b5c", None));
/// ```
pub fn check_version(uuid: &str, version: Option<char>) -> bool {
    let bytes = uuid.as_bytes();
    let (Some(&ver), Some(&var)) = (bytes.get(VERSION_POS), bytes.get(VARIANT_POS)) else {
        return false;
    };
    let (ver, var) = (ver as char, var as char);
    version.map_or(true, |expected| ver == expected)
        && (ver == '9' || (matches!(ver, '1' | '4') && "89abAB".contains(var)))
}

/// Switches selecting the optional checks performed by [`is_valid_uuidv9`].
///
/// Both are off by default; a switch that is off is neither required nor checked.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidateOptions {
    /// Require a valid trailing checksum.
    pub checksum: bool,

    /// Require a valid version and variant.
    pub version: bool,
}

impl ValidateOptions {
    /// Creates options with every check turned off.
    pub const fn new() -> Self {
        Self {
            checksum: false,
            version: false,
        }
    }

    /// Turns the checksum check on or off.
    pub const fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Turns the version check on or off.
    pub const fn version(mut self, version: bool) -> Self {
        self.version = version;
        self
    }
}

/// Returns true if `uuid` is well-formed and passes each check requested in `options`.
///
/// # Examples
///
/// ```rust
/// use uuidv9::{generate, is_valid_uuidv9, GenerateOptions, ValidateOptions};
///
/// let id = generate(&GenerateOptions::new().checksum(true).version(true))?.to_string();
/// assert!(is_valid_uuidv9(&id, &ValidateOptions::new().checksum(true).version(true)));
/// # Ok::<(), uuidv9::Error>(())
/// ```
pub fn is_valid_uuidv9(uuid: &str, options: &ValidateOptions) -> bool {
    is_uuid(uuid)
        && (!options.checksum || verify_checksum(uuid))
        && (!options.version || check_version(uuid, None))
}
