// SPDX-License-Identifier: MIT

//! Prefixed, human-readable API keys.
use crate::{charset::Charset, entropy::Entropy, error::Result, generator::Generator};

use alloc::string::String;

/// Joins the prefix to the random part.
pub const API_KEY_SEPARATOR: char = '_';

/// Charset of the random part. It excludes the separator so a key
/// always splits unambiguously at its last `_`.
pub const API_KEY_CHARSET: Charset = Charset::Alphanumeric;

/// Default length of the random part.
pub const API_KEY_LENGTH: usize = 24;

impl<E> Generator<E>
where
    E: Entropy,
{
    /// `{prefix}_{random}` with a `length`-symbol alphanumeric random
    /// part, or the random part alone when `prefix` is empty.
    ///
    /// ```
    /// use cryptostrings::{entropy::OsEntropy, Generator};
    ///
    /// # fn main() -> Result<(), cryptostrings::Error> {
    /// let key = Generator::new(OsEntropy::default()).generate_api_key("svc", 32)?;
    /// assert!(key.starts_with("svc_"));
    /// assert_eq!(key.len(), 36);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidLength`](crate::Error::InvalidLength)
    /// if `length` is zero, or an error from the entropy source.
    pub fn generate_api_key(&mut self, prefix: &str, length: usize) -> Result<String> {
        let random = self.generate_string(length, &API_KEY_CHARSET)?;
        if prefix.is_empty() {
            return Ok(random);
        }
        let mut key = String::with_capacity(prefix.len() + 1 + random.len());
        key.push_str(prefix);
        key.push(API_KEY_SEPARATOR);
        key.push_str(&random);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{API_KEY_CHARSET, API_KEY_LENGTH, API_KEY_SEPARATOR};
    use crate::{
        entropy::{mock::MockEntropy, OsEntropy},
        error::Error,
        generator::Generator,
        level::SecurityLevel,
    };

    #[test]
    fn prefixed_key() -> Result<(), Error> {
        let symbols = API_KEY_CHARSET.symbols()?;
        let mut gen = Generator::with_level(OsEntropy::new(), SecurityLevel::Paranoid);
        let key = gen.generate_api_key("svc", 32)?;
        let random = key.strip_prefix("svc_").unwrap();
        assert_eq!(random.chars().count(), 32);
        assert!(random.chars().all(|c| symbols.contains(&c)));
        Ok(())
    }

    #[test]
    fn prefix_may_contain_separator() -> Result<(), Error> {
        let key = Generator::new(OsEntropy::new()).generate_api_key("user_42", 16)?;
        let (prefix, random) = key.rsplit_once(API_KEY_SEPARATOR).unwrap();
        assert_eq!(prefix, "user_42");
        assert_eq!(random.len(), 16);
        Ok(())
    }

    #[test]
    fn empty_prefix_is_bare_random_part() -> Result<(), Error> {
        let key = Generator::new(OsEntropy::new()).generate_api_key("", API_KEY_LENGTH)?;
        assert_eq!(key.len(), API_KEY_LENGTH);
        assert!(!key.contains(API_KEY_SEPARATOR));
        Ok(())
    }

    #[test]
    fn zero_length_is_rejected() {
        let mut entropy = MockEntropy::counting();
        let mut gen = Generator::new(&mut entropy);
        assert_eq!(gen.generate_api_key("svc", 0), Err(Error::InvalidLength));
        drop(gen);
        assert_eq!(entropy.calls, 0);
    }

    #[test]
    fn keys_are_unique() -> Result<(), Error> {
        let mut gen = Generator::new(OsEntropy::new());
        let keys: std::collections::HashSet<_> = (0..1000)
            .map(|_| gen.generate_api_key("k", API_KEY_LENGTH))
            .collect::<Result<_, Error>>()?;
        assert_eq!(keys.len(), 1000);
        Ok(())
    }
}
