//! UUIDv9 generator and related types.

use crate::layout::{Frame, CHECKSUM_LEN, JOINED_LEN};
use crate::{Error, GenerateOptions, Uuid};

pub mod with_rand08;


/// A trait that defines the minimum random number generator interface for [`Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns a random hexadecimal digit in `0..16`.
    fn next_nibble(&mut self) -> u8 {
        (self.next_u32() & 15) as u8
    }
}

/// A trait that defines the minimum system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current Unix time in seconds.
    fn unix_ts_secs(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_secs(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_secs()
    }
}

/// Variant digits allowed by RFC 4122, from which the legacy marker is drawn.
const LEGACY_VARIANTS: [u8; 4] = [0x8, 0x9, 0xa, 0xb];

/// Represents a UUIDv9 generator bound to a random number source and a clock.
///
/// The generator keeps no state between calls besides its sources, so identical sources and
/// options always produce identical output. This makes the layout testable with fixed sources.
///
/// # Examples
///
/// ```rust
/// use uuidv9::{GenerateOptions, Generator};
///
/// let mut g = Generator::with_rand08(rand::thread_rng());
/// let id = g.generate(&GenerateOptions::new().prefix("a1b2c3d4").checksum(true))?;
/// assert!(id.to_string().starts_with("a1b2c3d4-"));
/// assert!(id.has_valid_checksum());
/// # Ok::<(), uuidv9::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R: RandSource> Generator<R> {
    /// Creates a generator object with a specified random number generator and the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            rand_source,
            time_source,
        }
    }

    /// Generates a new UUIDv9 object laid out as `options` describe.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is longer than eight characters or not hexadecimal, or if
    /// the timestamp cannot be expressed as non-negative Unix seconds.
    pub fn generate(&mut self, options: &GenerateOptions) -> Result<Uuid, Error> {
        let prefix = options.normalized_prefix()?;
        let time_source = &mut self.time_source;
        let center = options
            .timestamp
            .resolve(|| time_source.unix_ts_secs())
            .inspect_err(|e| tracing::debug!(error = %e, "rejected timestamp"))?
            .map(|secs| format!("{secs:x}"))
            .unwrap_or_default();

        let checksum_reserve = if options.checksum { CHECKSUM_LEN } else { 0 };
        let marker_reserve = match (options.legacy, options.version) {
            (true, _) => 2,
            (false, true) => 1,
            (false, false) => 0,
        };
        let needed = prefix.len() + center.len() + checksum_reserve + marker_reserve;
        let Some(suffix_len) = JOINED_LEN.checked_sub(needed) else {
            return Err(Error::LayoutOverflow { needed });
        };

        let mut frame = Frame::new();
        frame.push_hex(&prefix);
        frame.push_hex(&center);
        let rng = &mut self.rand_source;
        frame.push_digits((0..suffix_len).map(|_| rng.next_nibble()));

        if options.legacy {
            frame.set_version_nibble(if center.is_empty() { 0x4 } else { 0x1 });
            let variant = LEGACY_VARIANTS[(self.rand_source.next_u32() & 3) as usize];
            frame.set_variant_nibble(variant);
        } else if options.version {
            frame.set_version_nibble(0x9);
        }

        if options.checksum {
            frame.push_checksum();
        }

        tracing::trace!(
            prefix_len = prefix.len(),
            center_len = center.len(),
            suffix_len,
            legacy = options.legacy,
            version = options.version,
            checksum = options.checksum,
            "assembled identifier"
        );
        frame
            .finish()
            .ok_or(Error::LayoutOverflow { needed: frame.len() })
    }
}
