//! An implementation of UUIDv9: prefixable, time-sortable identifiers in UUID clothing
//!
//! ```rust
//! use uuidv9::{generate, GenerateOptions};
//!
//! let uuid = generate(&GenerateOptions::new().prefix("a1b2c3d4").checksum(true))?;
//! println!("{}", uuid); // e.g., "a1b2c3d4-6512-a3f0-7c1d-9e04b2a85f3e"
//! assert!(uuidv9::verify_checksum(&uuid.to_string()));
//! # Ok::<(), uuidv9::Error>(())
//! ```
//!
//! # Field and digit layout
//!
//! A UUIDv9 is 32 hexadecimal digits grouped 8-4-4-4-12. The digits are filled left to right:
//!
//! ```text
//! +--------+----------------+-----------------------------+----------+
//! | prefix |     center     |           random            | checksum |
//! | 0-8    | 0-16 digits    | remainder                   | 0 or 2   |
//! +--------+----------------+-----------------------------+----------+
//!
//!   xxxxxxxx-xxxx-Vxxx-Wxxx-xxxxxxxxxxCC
//!                 ^    ^              ^^
//!                 |    |              checksum
//!                 |    variant (legacy only)
//!                 version
//! ```
//!
//! Where:
//!
//! - The optional `prefix` holds up to eight caller-supplied hexadecimal digits, lowercased.
//! - The optional `center` holds the Unix time in seconds as lowercase hexadecimal without
//!   padding, so identifiers generated later sort after earlier ones.
//! - The `random` field fills the remaining digits.
//! - The optional version digit `V` is `9`, or `1`/`4` for legacy identifiers (`1` when a
//!   timestamp is embedded). Legacy identifiers also carry a variant digit `W` from `[89ab]`.
//!   Markers are placed at fixed positions and the fields after them move right to make room.
//! - The optional two-digit `checksum` is the CRC-8 (polynomial `0x07`, zero initial value, no
//!   final XOR) of the first 30 digits read as 15 bytes.
//!
//! # Validation
//!
//! ```rust
//! use uuidv9::{is_uuid, is_valid_uuidv9, ValidateOptions};
//!
//! let id = "a1b2c3d4-6512-9a3f-0ccc-cccccccccccc";
//! assert!(is_uuid(id));
//! assert!(is_valid_uuidv9(id, &ValidateOptions::new().version(true)));
//! ```
//!
//! The random digits come from [`rand::rngs::ThreadRng`] by default and are not meant to be
//! unpredictable. Use [`Generator`] to plug in other random number and clock sources.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod checksum;
pub use checksum::{calc_checksum, crc8};

mod error;
pub use error::Error;

mod id;
pub use id::{ParseError, Uuid};

mod layout;

mod options;
pub use options::{validate_prefix, GenerateOptions, Timestamp, MAX_PREFIX_LEN};

mod validate;
pub use validate::{check_version, is_uuid, is_valid_uuidv9, verify_checksum, ValidateOptions};

pub mod generator;
#[doc(inline)]
pub use generator::Generator;

mod entry;
pub use entry::{generate, generate_with, uuidv9};
