//! CRC-8 checksum shared by the generator and the validators.

/// Generator polynomial x^8 + x^2 + x + 1.
const POLYNOMIAL: u8 = 0x07;

/// Computes the CRC-8 (polynomial `0x07`, zero initial value, no final XOR) of `bytes`.
///
/// # Examples
///
/// ```rust
/// assert_eq!(uuidv9::crc8(b"123456789"), 0xf4);
/// ```
pub const fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        crc ^= bytes[i];
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        i += 1;
    }
    crc
}

/// Computes the two-digit lowercase hexadecimal checksum of a hexadecimal string.
///
/// The input is read two digits at a time, each pair forming one byte. A trailing odd digit is
/// taken as a byte of its own. Returns `None` if any pair fails to parse as hexadecimal.
///
/// # Examples
///
/// ```rust
/// use uuidv9::calc_checksum;
///
/// assert_eq!(calc_checksum("00").as_deref(), Some("00"));
/// assert_eq!(calc_checksum("313233343536373839").as_deref(), Some("f4"));
/// assert_eq!(calc_checksum("zz"), None);
/// ```
pub fn calc_checksum(hex: &str) -> Option<String> {
    let bytes = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            pair.iter().try_fold(0u8, |acc, &c| {
                let digit = (c as char).to_digit(16)? as u8;
                Some((acc << 4) | digit)
            })
        })
        .collect::<Option<Vec<u8>>>()?;
    Some(format!("{:02x}", crc8(&bytes)))
}
