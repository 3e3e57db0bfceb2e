//! Digit-level builder for the 32-digit joined form.
//!
//! Fields are appended left to right as 4-bit digits. Marker digits are then placed at fixed
//! absolute slots, moving whatever content sits at or after the slot one digit to the right; the
//! caller sizes the random field so that the frame ends up exactly full.
//!
//! ```text
//!  index  0       8   12  16  20          32
//!         |prefix |center |random  ...    |cs|
//!                     ^   ^                ^
//!                     |   variant (legacy) checksum (last two digits)
//!                     version
//! ```
//!
//! Joined index 12 is hyphenated index 14 and joined index 16 is hyphenated index 19, so the
//! markers always land on the UUID version and variant nibbles no matter how long the prefix or
//! the timestamp is.

use crate::{crc8, Uuid};

/// Number of digits in the joined form.
pub(crate) const JOINED_LEN: usize = 32;

/// Number of trailing digits taken by the checksum.
pub(crate) const CHECKSUM_LEN: usize = 2;

/// Joined-form slot of the version digit.
pub(crate) const VERSION_SLOT: usize = 12;

/// Joined-form slot of the variant digit, counted after the version digit is in place.
pub(crate) const VARIANT_SLOT: usize = 16;

/// A partially assembled identifier held as one 4-bit value per digit.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Frame {
    digits: [u8; JOINED_LEN],
    len: usize,
}

impl Frame {
    pub(crate) const fn new() -> Self {
        Self {
            digits: [0; JOINED_LEN],
            len: 0,
        }
    }

    /// Returns the number of digits placed so far.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Appends digits, each of which must be below 16.
    ///
    /// # Panics
    ///
    /// Panics if the frame overflows.
    pub(crate) fn push_digits(&mut self, digits: impl IntoIterator<Item = u8>) {
        for d in digits {
            debug_assert!(d < 16, "digit out of range");
            assert!(self.len < JOINED_LEN, "frame overflow");
            self.digits[self.len] = d & 15;
            self.len += 1;
        }
    }

    /// Appends the digits of a hexadecimal string, one slot per character.
    ///
    /// Callers pass validated hex only; a stray character still takes its slot (as zero in
    /// release builds) so the fields after it keep their positions.
    pub(crate) fn push_hex(&mut self, hex: &str) {
        self.push_digits(hex.chars().map(|c| {
            let d = c.to_digit(16);
            debug_assert!(d.is_some(), "non-hexadecimal digit {c:?}");
            d.unwrap_or(0) as u8
        }));
    }

    /// Places `digit` at `slot`, moving the content from `slot` onwards one position right.
    fn insert_at(&mut self, slot: usize, digit: u8) {
        assert!(self.len < JOINED_LEN, "frame overflow");
        assert!(slot <= self.len, "marker slot past the end of the frame");
        self.digits.copy_within(slot..self.len, slot + 1);
        self.digits[slot] = digit & 15;
        self.len += 1;
    }

    /// Places the version marker at joined index 12.
    pub(crate) fn set_version_nibble(&mut self, digit: u8) {
        self.insert_at(VERSION_SLOT, digit);
    }

    /// Places the variant marker at joined index 16.
    ///
    /// Call after [`Frame::set_version_nibble`], whose shift this slot accounts for.
    pub(crate) fn set_variant_nibble(&mut self, digit: u8) {
        self.insert_at(VARIANT_SLOT, digit);
    }

    /// Packs digits pairwise into bytes; a trailing odd digit becomes a byte of its own.
    fn packed(&self) -> impl Iterator<Item = u8> + '_ {
        self.digits[..self.len]
            .chunks(2)
            .map(|pair| pair.iter().fold(0u8, |acc, d| (acc << 4) | d))
    }

    /// Appends the two-digit CRC-8 of everything placed so far.
    pub(crate) fn push_checksum(&mut self) {
        let bytes: Vec<u8> = self.packed().collect();
        let crc = crc8(&bytes);
        self.push_digits([crc >> 4, crc & 15]);
    }

    /// Converts a full frame into a [`Uuid`].
    ///
    /// Returns `None` unless exactly 32 digits have been placed.
    pub(crate) fn finish(&self) -> Option<Uuid> {
        if self.len != JOINED_LEN {
            return None;
        }
        let mut bytes = [0u8; 16];
        for (dst, src) in bytes.iter_mut().zip(self.packed()) {
            *dst = src;
        }
        Some(Uuid::from(bytes))
    }
}
