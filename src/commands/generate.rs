// SPDX-License-Identifier: MIT

//! Random credential generation for /generate.
//!
//! Purely illustrative output; nothing here touches the directory.

use rand::seq::SliceRandom;
use rand::Rng;

/// Prefix every generated username carries.
const USERNAME_PREFIX: &str = "wolf_";

/// Total generated username length, prefix included.
const USERNAME_LEN: usize = 8;

/// Generated password length.
const PASSWORD_LEN: usize = 4;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a username: fixed prefix padded to length with lowercase
/// alphanumerics.
pub fn generate_username() -> String {
    let mut rng = rand::thread_rng();
    let mut username = String::with_capacity(USERNAME_LEN);
    username.push_str(USERNAME_PREFIX);
    for _ in USERNAME_PREFIX.len()..USERNAME_LEN {
        let c = *SUFFIX_CHARSET.choose(&mut rng).unwrap_or(&b'x');
        username.push(c as char);
    }
    username
}

/// Generate a password from ASCII letters, digits, and punctuation.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..PASSWORD_LEN)
        .map(|_| {
            // Printable ASCII excluding space: '!' (0x21) through '~' (0x7e)
            rng.gen_range(0x21u8..=0x7e) as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_shape() {
        for _ in 0..50 {
            let username = generate_username();
            assert_eq!(username.len(), USERNAME_LEN);
            assert!(username.starts_with(USERNAME_PREFIX));
            let suffix = &username[USERNAME_PREFIX.len()..];
            assert!(suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_password_shape() {
        for _ in 0..50 {
            let password = generate_password();
            assert_eq!(password.len(), PASSWORD_LEN);
            assert!(password
                .bytes()
                .all(|b| b.is_ascii_graphic()));
        }
    }
}
