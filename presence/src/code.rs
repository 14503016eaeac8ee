//! Rotating attendance code.
//!
//! Each class session owns a random secret; the code shown on the teacher's
//! screen is an HMAC-SHA256 of the current time window, truncated to six
//! digits. Verification accepts the adjacent windows so a code typed just as
//! it rotates still lands.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// How long a single code stays on screen.
pub const ROTATION_SECONDS: i64 = 60;

const DIGITS: u32 = 6;

/// Fresh per-session secret: 32 random bytes, hex encoded.
pub fn generate_secret() -> String {
    use rand::RngCore;
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Index of the rotation window containing `now`.
pub fn window_at(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(ROTATION_SECONDS)
}

/// Seconds left before the code on screen rotates away.
pub fn seconds_until_rotation(now: DateTime<Utc>) -> i64 {
    ROTATION_SECONDS - now.timestamp().rem_euclid(ROTATION_SECONDS)
}

/// Deterministic 6-digit code for one rotation window.
pub fn code_for_window(secret: &str, window: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(&window.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // RFC 4226 dynamic truncation
    let offset = (digest[31] & 0x0f) as usize;
    let slice = &digest[offset..offset + 4];
    let val = u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]) & 0x7fff_ffff;

    let num = val % 10u32.pow(DIGITS);

    let mut s = num.to_string();
    while s.len() < DIGITS as usize {
        s.insert(0, '0');
    }
    s
}

/// Code currently on screen.
pub fn current_code(secret: &str, now: DateTime<Utc>) -> String {
    code_for_window(secret, window_at(now))
}

/// Checks a submitted code against the current window and its neighbours.
pub fn verify(secret: &str, submitted: &str, now: DateTime<Utc>) -> bool {
    let submitted = submitted.trim();
    let window = window_at(now);
    (window - 1..=window + 1).any(|w| code_for_window(secret, w) == submitted)
}
