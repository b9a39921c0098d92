use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_secret_with_given_length() {
        assert_eq!(create_random_secret(16).len(), 16);
        assert!(create_random_secret(0).is_empty());
    }

    #[test]
    fn creates_alphanumeric_secrets() {
        let secret = create_random_secret(64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, create_random_secret(64));
    }
}
