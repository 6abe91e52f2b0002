use base64::engine::general_purpose;
use base64::Engine;
use rand_core::{OsRng, RngCore};

const SECRET_BYTES: usize = 32;

/// Fresh 256-bit signing secret, base64 encoded.
pub fn generate_session_secret() -> String {
    let mut buffer = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut buffer);
    general_purpose::STANDARD.encode(buffer)
}
