//! Account password hashing using Argon2id.
//!
//! Stored form: `argon2id$m=<KiB>,t=<passes>,p=<lanes>$<base64 salt>$<base64 hash>`.
//! Verification reads the cost parameters back from the stored value, so
//! hashes made before a parameter change still verify.

use argon2::Argon2;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, TankerError};

/// Argon2id parameters: 19 MiB, 2 passes, single lane.
const ARGON2_MEMORY_KB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;
const SCHEME: &str = "argon2id";

/// Argon2 cost parameters as written into the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cost {
    memory_kb: u32,
    iterations: u32,
    parallelism: u32,
}

impl Cost {
    const DEFAULT: Cost = Cost {
        memory_kb: ARGON2_MEMORY_KB,
        iterations: ARGON2_ITERATIONS,
        parallelism: ARGON2_PARALLELISM,
    };

    fn encode(&self) -> String {
        format!(
            "m={},t={},p={}",
            self.memory_kb, self.iterations, self.parallelism
        )
    }

    fn decode(segment: &str) -> Result<Cost> {
        let (mut memory_kb, mut iterations, mut parallelism) = (None, None, None);
        for pair in segment.split(',') {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid_params(segment))?;
            let value: u32 = value.parse().map_err(|_| invalid_params(segment))?;
            let slot = match key {
                "m" => &mut memory_kb,
                "t" => &mut iterations,
                "p" => &mut parallelism,
                _ => return Err(invalid_params(segment)),
            };
            if slot.replace(value).is_some() {
                return Err(invalid_params(segment));
            }
        }
        match (memory_kb, iterations, parallelism) {
            (Some(memory_kb), Some(iterations), Some(parallelism)) => Ok(Cost {
                memory_kb,
                iterations,
                parallelism,
            }),
            _ => Err(invalid_params(segment)),
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        let params = argon2::Params::new(
            self.memory_kb,
            self.iterations,
            self.parallelism,
            Some(HASH_LENGTH),
        )
        .map_err(|e| TankerError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; HASH_LENGTH]> {
        let mut out = [0u8; HASH_LENGTH];
        self.argon2()?
            .hash_password_into(password.as_bytes(), salt, &mut out)
            .map_err(|e| TankerError::Crypto(format!("Password hashing failed: {}", e)))?;
        Ok(out)
    }
}

fn invalid_params(segment: &str) -> TankerError {
    TankerError::Crypto(format!("Invalid password hash parameters: {}", segment))
}

fn hash_with(password: &str, cost: Cost) -> Result<String> {
    if password.is_empty() {
        return Err(TankerError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    let mut salt = [0u8; SALT_LENGTH];
    getrandom::getrandom(&mut salt)
        .map_err(|e| TankerError::Crypto(format!("Failed to generate salt: {}", e)))?;
    let hash = cost.derive(password, &salt)?;
    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        cost.encode(),
        STANDARD.encode(salt),
        STANDARD.encode(hash)
    ))
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    hash_with(password, Cost::DEFAULT)
}

/// Check `password` against a value produced by `hash_password`.
///
/// # Errors
///
/// Returns `TankerError::Crypto` if `stored` is not a recognised hash.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let mut parts = stored.splitn(4, '$');
    let (Some(SCHEME), Some(params), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TankerError::Crypto("Unrecognised password hash".to_string()));
    };
    let cost = Cost::decode(params)?;
    let salt = STANDARD
        .decode(salt)
        .map_err(|e| TankerError::Crypto(format!("Invalid password salt: {}", e)))?;
    let expected = STANDARD
        .decode(expected)
        .map_err(|e| TankerError::Crypto(format!("Invalid password hash: {}", e)))?;

    let actual = cost.derive(password, &salt)?;
    // Compare every byte regardless of where the first mismatch is.
    let diff = actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    Ok(expected.len() == HASH_LENGTH && diff == 0)
}
