// SPDX-License-Identifier: MIT

//! Free functions over the process-wide OS entropy source.
//!
//! Each call builds a short-lived [`Generator`] on top of
//! [`OsEntropy::shared()`], so no state is kept between calls apart
//! from the one-time OS entropy probe. All functions are safe to call
//! from any number of threads.
use crate::{
    apikey::API_KEY_CHARSET,
    charset::Charset,
    entropy::{Entropy, OsEntropy},
    error::Result,
    generator::{self, Generator, MAX_NUMBER_BITS},
    level::SecurityLevel,
    password::PasswordPolicy,
};

use std::{string::String, vec::Vec};

fn generator(level: SecurityLevel) -> Result<Generator<OsEntropy>> {
    Ok(Generator::with_level(OsEntropy::shared()?, level))
}

// Each call validates its arguments before `open` touches the entropy
// source.

fn bytes<E, F>(open: F, length: usize, level: SecurityLevel) -> Result<Vec<u8>>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    generator::check_length(length)?;
    open(level)?.generate_bytes(length)
}

fn string<E, F>(open: F, length: usize, charset: &Charset, level: SecurityLevel) -> Result<String>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    generator::check_length(length)?;
    charset.symbols()?;
    open(level)?.generate_string(length, charset)
}

fn number<E, F>(open: F, bits: u32) -> Result<u128>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    generator::check_bits(bits, MAX_NUMBER_BITS)?;
    open(SecurityLevel::default())?.generate_number(bits)
}

fn number_bytes<E, F>(open: F, bits: u32) -> Result<Vec<u8>>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    generator::check_bits(bits, u32::MAX)?;
    open(SecurityLevel::default())?.generate_number_bytes(bits)
}

fn password<E, F>(open: F, policy: &PasswordPolicy, level: SecurityLevel) -> Result<String>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    policy.validate()?;
    open(level)?.generate_password(policy)
}

fn api_key<E, F>(open: F, prefix: &str, length: usize, level: SecurityLevel) -> Result<String>
where
    E: Entropy,
    F: FnOnce(SecurityLevel) -> Result<Generator<E>>,
{
    generator::check_length(length)?;
    API_KEY_CHARSET.symbols()?;
    open(level)?.generate_api_key(prefix, length)
}

/// `length` random bytes at `level`.
///
/// ```
/// use cryptostrings::{generate_bytes, SecurityLevel};
///
/// # fn main() -> Result<(), cryptostrings::Error> {
/// let key = generate_bytes(32, SecurityLevel::default())?;
/// assert_eq!(key.len(), 32);
/// # Ok(())
/// # }
/// ```
pub fn generate_bytes(length: usize, level: SecurityLevel) -> Result<Vec<u8>> {
    bytes(generator, length, level)
}

/// `length` symbols drawn uniformly from `charset` at `level`.
///
/// ```
/// use cryptostrings::{generate_string, Charset, SecurityLevel};
///
/// # fn main() -> Result<(), cryptostrings::Error> {
/// let code = generate_string(6, &Charset::Digits, SecurityLevel::High)?;
/// assert!(code.chars().all(|c| c.is_ascii_digit()));
///
/// let charset = Charset::resolve("custom", Some("ACGT"))?;
/// let dna = generate_string(12, &charset, SecurityLevel::Medium)?;
/// assert_eq!(dna.len(), 12);
/// # Ok(())
/// # }
/// ```
pub fn generate_string(length: usize, charset: &Charset, level: SecurityLevel) -> Result<String> {
    string(generator, length, charset, level)
}

/// An integer uniform over `[0, 2^bits - 1]`, for `1 <= bits <= 128`,
/// at the default level.
pub fn generate_number(bits: u32) -> Result<u128> {
    number(generator, bits)
}

/// Big-endian bytes of an integer uniform over `[0, 2^bits - 1]`, for
/// any positive `bits`, at the default level.
pub fn generate_number_bytes(bits: u32) -> Result<Vec<u8>> {
    number_bytes(generator, bits)
}

/// A `length`-character password with at least `min_digits` digits
/// and `min_special` punctuation characters.
pub fn generate_password(
    length: usize,
    min_digits: usize,
    min_special: usize,
    level: SecurityLevel,
) -> Result<String> {
    let policy = PasswordPolicy::new(length, min_digits, min_special);
    password(generator, &policy, level)
}

/// `{prefix}_{random}`, or the random part alone for an empty prefix.
pub fn generate_api_key(prefix: &str, length: usize, level: SecurityLevel) -> Result<String> {
    api_key(generator, prefix, length, level)
}
