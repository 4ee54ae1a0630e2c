//! One-Time-Passcode Generation
//!
//! Numeric verification codes for proving control of an email address.
//! Codes are digits only (no alphabetic confusion) and leading zeros
//! are valid, so they are handled as strings end to end.

use rand::Rng;
use rand::rngs::OsRng;

/// Number of digits in a verification code
pub const OTP_CODE_LENGTH: usize = 6;

/// Generate a random 6-digit code, `"000000"` through `"999999"`.
pub fn generate_code() -> String {
    let n: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", n, width = OTP_CODE_LENGTH)
}
