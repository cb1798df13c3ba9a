use rand::{distributions::Alphanumeric, Rng};

pub const PAYMENT_TOKEN_LEN: usize = 32;

/// Fresh opaque credential the client must present to confirm its hold.
pub fn generate_payment_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PAYMENT_TOKEN_LEN)
        .map(char::from)
        .collect()
}
