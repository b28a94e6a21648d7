//! Identifier and token generation.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix in session tokens.
const TOKEN_SUFFIX_LEN: usize = 13;

/// Generate an entity id of the form `<prefix>_<YYYYMMDD>_<NNNN>`.
///
/// The date is the current UTC date and `NNNN` is a zero-padded random number.
/// No collision detection is performed.
pub fn generate_entity_id(prefix: &str) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("{}_{}_{:04}", prefix, date, suffix)
}

/// Generate an opaque session token of the form `token_<millis>_<base36>`.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..TOKEN_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("token_{}_{}", Utc::now().timestamp_millis(), suffix)
}
