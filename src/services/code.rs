// src/services/code.rs

use rand::{Rng, thread_rng};

pub const CODE_LENGTH: usize = 8;

/// Uppercase letters and digits.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a fresh share code. Uniqueness is enforced by the store.
pub fn generate_code() -> String {
    let mut rng = thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Canonical form of a user-supplied code: trimmed and uppercased.
///
/// Returns `None` when the input cannot be any issued code, so lookups can
/// answer NotFound without touching the store.
pub fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    let well_formed = code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
    well_formed.then_some(code)
}
