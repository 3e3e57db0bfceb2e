//! Default generator and entry point functions

use crate::generator::{with_rand08::Adapter, RandSource, TimeSource};
use crate::{Error, GenerateOptions, Generator, Uuid};
use rand::rngs::ThreadRng;
use std::cell::RefCell;

thread_local! {
    static DEFAULT_GENERATOR: RefCell<Generator<Adapter<ThreadRng>>> = Default::default();
}

/// Generates a UUIDv9 object laid out as `options` describe.
///
/// This function employs a thread-local generator backed by [`ThreadRng`] and the system clock.
/// The random digits are not suitable for secrets.
///
/// # Errors
///
/// Returns an error if the prefix is longer than eight characters or not hexadecimal, or if the
/// timestamp cannot be expressed as non-negative Unix seconds.
///
/// # Examples
///
/// ```rust
/// use uuidv9::{generate, GenerateOptions};
///
/// let uuid = generate(&GenerateOptions::new())?;
/// println!("{uuid}"); // e.g., "6512a3f0-0cde-f5a8-e271-c0d4f3a9b6e2"
///
/// let uuid = generate(&GenerateOptions::new().prefix("a1b2c3d4").checksum(true))?;
/// println!("{uuid}"); // e.g., "a1b2c3d4-6512-a3f0-7c1d-9e04b2a85f3e"
///
/// let uuid_string: String = generate(&GenerateOptions::new().legacy(true))?.into();
/// # Ok::<(), uuidv9::Error>(())
/// ```
pub fn generate(options: &GenerateOptions) -> Result<Uuid, Error> {
    DEFAULT_GENERATOR.with(|g| g.borrow_mut().generate(options))
}

/// Generates a UUIDv9 object from caller-supplied random number and clock sources.
///
/// This is a one-shot shorthand for [`Generator::with_rand_and_time_sources`] followed by
/// [`Generator::generate`].
///
/// # Errors
///
/// Same as [`generate`].
///
/// # Examples
///
/// ```rust
/// use uuidv9::generator::{RandSource, TimeSource};
/// use uuidv9::{generate_with, GenerateOptions};
///
/// struct Zeros;
/// impl RandSource for Zeros {
///     fn next_u32(&mut self) -> u32 {
///         0
///     }
/// }
///
/// struct Fixed(u64);
/// impl TimeSource for Fixed {
///     fn unix_ts_secs(&mut self) -> u64 {
///         self.0
///     }
/// }
///
/// let uuid = generate_with(Zeros, Fixed(0x6512_a3f0), &GenerateOptions::new().version(true))?;
/// assert_eq!(uuid.to_string(), "6512a3f0-0000-9000-0000-000000000000");
/// # Ok::<(), uuidv9::Error>(())
/// ```
pub fn generate_with<R: RandSource, T: TimeSource>(
    rand_source: R,
    time_source: T,
    options: &GenerateOptions,
) -> Result<Uuid, Error> {
    Generator::with_rand_and_time_sources(rand_source, time_source).generate(options)
}

/// Generates a UUIDv9 object with the default options: a current timestamp followed by random
/// digits, with no prefix, markers, or checksum.
///
/// # Panics
///
/// Panics if the system clock reads earlier than the Unix epoch.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidv9::uuidv9();
/// assert!(uuidv9::is_uuid(&uuid.to_string()));
/// ```
pub fn uuidv9() -> Uuid {
    DEFAULT_GENERATOR.with(|g| {
        g.borrow_mut()
            .generate(&GenerateOptions::new())
            .expect("default options are always valid")
    })
}
