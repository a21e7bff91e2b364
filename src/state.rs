use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{TryRngCore, rngs::OsRng};

use crate::AuthError;

pub const DEFAULT_STATE_LENGTH: usize = 40;

/// Generates a CSRF state token of [`DEFAULT_STATE_LENGTH`] characters.
pub fn generate_state() -> Result<String, AuthError> {
    generate_state_with_length(DEFAULT_STATE_LENGTH)
}

/// Generates a random token of exactly `length` alphanumeric characters.
///
/// Bytes come from the operating system CSPRNG and are base64 encoded with
/// `/`, `+` and `=` stripped, so the token can be placed in a query string
/// without escaping.
pub fn generate_state_with_length(length: usize) -> Result<String, AuthError> {
    let mut state = String::with_capacity(length);
    while state.len() < length {
        let remaining = length - state.len();
        let mut bytes = vec![0u8; remaining];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| AuthError::OsRng {
                message: err.to_string(),
            })?;

        let encoded = STANDARD.encode(&bytes);
        state.extend(
            encoded
                .chars()
                .filter(|ch| !matches!(ch, '/' | '+' | '='))
                .take(remaining),
        );
    }
    Ok(state)
}
