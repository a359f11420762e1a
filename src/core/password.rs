use rand::distr::Alphanumeric;
use rand::Rng;

pub const PASSWORD_LENGTH: usize = 8;

/// Generates an initial account password from the supplied randomness
/// source: letters and digits only, fixed length. Not intended as a
/// long-term credential; users are expected to rotate it at first login.
pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
