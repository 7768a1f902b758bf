use std::str::FromStr;

use poem::web::cookie::CookieKey;

use crate::prelude::*;

/// Key length expected by the cookie encryption.
const COOKIE_KEY_LENGTH: usize = 64;

pub fn non_zero_usize(value: &str) -> Result<usize> {
    match FromStr::from_str(value)? {
        value if value >= 1 => Ok(value),
        _ => Err(anyhow!("expected a positive number")),
    }
}

pub fn sample_rate(value: &str) -> Result<f32> {
    match f32::from_str(value)? {
        value if (0.0..=1.0).contains(&value) => Ok(value),
        value => Err(anyhow!("{} is not within [0, 1]", value)),
    }
}

pub fn cookie_key(value: &str) -> Result<CookieKey> {
    let key = hex::decode(value.trim()).context("the cookie key must be hex-encoded")?;
    if key.len() == COOKIE_KEY_LENGTH {
        Ok(CookieKey::from(&key[..]))
    } else {
        Err(anyhow!(
            "expected a {}-byte cookie key, got {} bytes",
            COOKIE_KEY_LENGTH,
            key.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_usize_ok() {
        assert_eq!(non_zero_usize("3").unwrap(), 3);
        assert!(non_zero_usize("0").is_err());
        assert!(non_zero_usize("-1").is_err());
    }

    #[test]
    fn sample_rate_ok() {
        assert_eq!(sample_rate("0.25").unwrap(), 0.25);
        assert!(sample_rate("1.5").is_err());
        assert!(sample_rate("NaN").is_err());
    }

    #[test]
    fn cookie_key_ok() {
        assert!(cookie_key(&"ab".repeat(COOKIE_KEY_LENGTH)).is_ok());
    }

    #[test]
    fn short_cookie_key_fails() {
        assert!(cookie_key(&"ab".repeat(32)).is_err());
    }

    #[test]
    fn malformed_cookie_key_fails() {
        assert!(cookie_key(&"zz".repeat(COOKIE_KEY_LENGTH)).is_err());
    }
}
