// SPDX-License-Identifier: MIT

//! The level-aware generator behind every public operation.
//!
//! [`Generator`] pairs an [`Entropy`] source with a [`SecurityLevel`].
//! Byte requests go through the mixing passes the level selects;
//! strings and passwords are rejection-sampled from that mixed stream.
use crate::{
    charset::Charset,
    entropy::Entropy,
    error::{Error, Result},
    level::{MixPolicy, SecurityLevel},
    mix, sampler,
};

use alloc::{string::String, vec, vec::Vec};

const MAX_MIX_PASSES: u32 = 16;

/// Widest integer [`Generator::generate_number`] returns.
pub const MAX_NUMBER_BITS: u32 = u128::BITS;

/// Reject an empty request.
pub(crate) fn check_length(length: usize) -> Result<()> {
    if length == 0 {
        return Err(Error::InvalidLength);
    }
    Ok(())
}

/// Reject bit widths outside `1..=max`.
pub(crate) fn check_bits(bits: u32, max: u32) -> Result<()> {
    if bits == 0 || bits > max {
        return Err(Error::InvalidBitWidth { bits, max });
    }
    Ok(())
}

/// High bits of the leading byte that a `bits`-wide number leaves
/// unused.
fn unused_high_bits(bits: u32) -> u32 {
    (8 - bits % 8) % 8
}

/// Secure value generator over an entropy source `E`.
///
/// # Example
///
/// ```
/// use cryptostrings::{entropy::OsEntropy, Charset, Generator, SecurityLevel};
///
/// # use cryptostrings::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut gen = Generator::with_level(OsEntropy::default(), SecurityLevel::Paranoid);
///
/// let key = gen.generate_bytes(32)?;
/// assert_eq!(key.len(), 32);
///
/// let token = gen.generate_string(24, &Charset::UrlSafe)?;
/// assert_eq!(token.len(), 24);
/// #
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Generator<E> {
    entropy: E,
    level: SecurityLevel,
    policy: MixPolicy,
}

/// Builder class for configuring [`Generator`] instances.
///
/// The security level defaults to [`SecurityLevel::High`].
///
/// # Example
/// ```
/// use cryptostrings::{entropy::OsEntropy, GeneratorBuilder, SecurityLevel};
///
/// let gen = GeneratorBuilder::new(OsEntropy::default())
///     .security_level(SecurityLevel::High)
///     .mix_passes(2)
///     .build();
/// assert_eq!(gen.policy().passes, 2);
/// ```
#[derive(Debug)]
pub struct GeneratorBuilder<E> {
    level: SecurityLevel,
    passes: Option<u32>,
    entropy: E,
}

impl<E> GeneratorBuilder<E>
where
    E: Entropy,
{
    pub fn new(entropy: E) -> Self {
        Self {
            level: SecurityLevel::default(),
            passes: None,
            entropy,
        }
    }

    /// Specify the security level. By default, this is
    /// [`SecurityLevel::High`].
    pub fn security_level(mut self, level: SecurityLevel) -> Self {
        self.level = level;
        self
    }

    /// Override the number of mixing passes.
    ///
    /// By default, the pass count is taken from the security level.
    ///
    /// # Panics
    ///
    /// This function panics if `passes` exceeds 16.
    pub fn mix_passes(mut self, passes: u32) -> Self {
        if passes > MAX_MIX_PASSES {
            panic!("Generator: mix passes exceed max of {}", MAX_MIX_PASSES)
        }
        self.passes = Some(passes);
        self
    }

    /// Build and return a new [`Generator`].
    ///
    /// # Panics
    ///
    /// Panics if the configured pass count is lower than the one the
    /// security level requires. A builder can add passes to a level,
    /// never remove them.
    pub fn build(self) -> Generator<E> {
        let mut policy = self.level.policy();
        if let Some(passes) = self.passes {
            if passes < policy.passes {
                panic!(
                    "Generator: {} passes is below the {} level minimum of {}",
                    passes, self.level, policy.passes
                )
            }
            policy.passes = passes;
        }
        Generator {
            entropy: self.entropy,
            level: self.level,
            policy,
        }
    }
}

/// Entropy adapter that applies a generator's mixing policy to every
/// draw.
pub(crate) struct Mixed<'a, E> {
    entropy: &'a mut E,
    policy: MixPolicy,
}

impl<E> Entropy for Mixed<'_, E>
where
    E: Entropy,
{
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        mix::fill_mixed(&mut *self.entropy, self.policy, bytes)
    }
}

impl<E> Generator<E> {
    /// A generator at the default [`SecurityLevel::High`].
    pub fn new(entropy: E) -> Self {
        Self::with_level(entropy, SecurityLevel::default())
    }

    pub fn with_level(entropy: E, level: SecurityLevel) -> Self {
        Self {
            entropy,
            level,
            policy: level.policy(),
        }
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.level
    }

    pub fn policy(&self) -> MixPolicy {
        self.policy
    }

    pub fn into_inner(self) -> E {
        self.entropy
    }
}

impl<E> Generator<E>
where
    E: Entropy,
{
    pub(crate) fn mixed(&mut self) -> Mixed<'_, E> {
        Mixed {
            entropy: &mut self.entropy,
            policy: self.policy,
        }
    }

    /// Fill `bytes` with random data at the configured level.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidLength`] if `bytes` is empty, or an
    /// error from the entropy source.
    pub fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        check_length(bytes.len())?;
        log::trace!(
            "generating {} bytes at {} level ({} passes)",
            bytes.len(),
            self.level,
            self.policy.passes
        );
        self.mixed().fill_bytes(bytes)
    }

    /// Exactly `length` random bytes, independent of level.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidLength`] if `length` is zero, or an
    /// error from the entropy source.
    pub fn generate_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        check_length(length)?;
        let mut bytes = vec![0u8; length];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// A string of `length` symbols drawn uniformly from `charset`.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidLength`] if `length` is zero,
    /// [`Error::InvalidCharset`] if a custom charset has fewer than
    /// two distinct symbols, or an error from the entropy source.
    pub fn generate_string(&mut self, length: usize, charset: &Charset) -> Result<String> {
        check_length(length)?;
        let symbols = charset.symbols()?;
        log::trace!(
            "generating {} symbols from {} charset at {} level",
            length,
            charset.name(),
            self.level
        );
        sampler::sample(&symbols, length, &mut self.mixed())
    }

    /// Big-endian bytes of an integer uniform over `[0, 2^bits - 1]`.
    ///
    /// The result is `ceil(bits / 8)` bytes long, with the unused high
    /// bits of the first byte cleared. Any positive width is accepted.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidBitWidth`] if `bits` is zero, or an
    /// error from the entropy source.
    pub fn generate_number_bytes(&mut self, bits: u32) -> Result<Vec<u8>> {
        check_bits(bits, u32::MAX)?;
        let len = (bits as usize).div_ceil(8);
        let mut bytes = self.generate_bytes(len)?;
        bytes[0] &= 0xff >> unused_high_bits(bits);
        Ok(bytes)
    }

    /// An integer uniform over `[0, 2^bits - 1]`, both ends included.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidBitWidth`] unless `1 <= bits <= 128`,
    /// or an error from the entropy source.
    pub fn generate_number(&mut self, bits: u32) -> Result<u128> {
        check_bits(bits, MAX_NUMBER_BITS)?;
        let mut bytes = self.generate_number_bytes(bits)?;
        let n = bytes
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
        bytes.iter_mut().for_each(|v| *v = 0);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::{unused_high_bits, Generator, GeneratorBuilder};
    use crate::{
        charset::Charset,
        entropy::{
            mock::{BrokenEntropy, MockEntropy},
            OsEntropy,
        },
        error::Error,
        level::SecurityLevel,
    };

    #[test]
    fn byte_length_is_exact_at_every_level() -> Result<(), Error> {
        for level in SecurityLevel::ALL {
            let mut gen = Generator::with_level(OsEntropy::new(), level);
            for len in [1usize, 16, 31, 64, 1000] {
                assert_eq!(gen.generate_bytes(len)?.len(), len);
            }
        }
        Ok(())
    }

    #[test]
    fn zero_length_is_rejected_without_drawing() {
        let mut entropy = MockEntropy::counting();
        let mut gen = Generator::new(&mut entropy);
        assert_eq!(gen.generate_bytes(0), Err(Error::InvalidLength));
        assert_eq!(gen.fill_bytes(&mut []), Err(Error::InvalidLength));
        assert_eq!(
            gen.generate_string(0, &Charset::Hex),
            Err(Error::InvalidLength)
        );
        assert_eq!(
            gen.generate_string(8, &Charset::custom("a")),
            Err(Error::InvalidCharset { distinct: 1 })
        );
        drop(gen);
        assert_eq!(entropy.calls, 0);
    }

    #[test]
    fn strings_stay_in_charset() -> Result<(), Error> {
        let mut gen = Generator::new(OsEntropy::new());
        let mut charsets = Charset::BUILTIN.to_vec();
        charsets.push(Charset::custom("xyz!"));
        for charset in charsets {
            let symbols = charset.symbols()?;
            let s = gen.generate_string(100, &charset)?;
            assert_eq!(s.chars().count(), 100);
            assert!(s.chars().all(|c| symbols.contains(&c)), "{}", charset.name());
        }
        Ok(())
    }

    #[test]
    fn hex_strings_decode() -> Result<(), Error> {
        let mut gen = Generator::with_level(OsEntropy::new(), SecurityLevel::Paranoid);
        let s = gen.generate_string(32, &Charset::Hex)?;
        assert_eq!(hex::decode(&s).map(|b| b.len()), Ok(16));
        Ok(())
    }

    #[test]
    fn consecutive_calls_differ() -> Result<(), Error> {
        for level in SecurityLevel::ALL {
            let mut gen = Generator::with_level(OsEntropy::new(), level);
            assert_ne!(gen.generate_bytes(32)?, gen.generate_bytes(32)?);
            assert_ne!(
                gen.generate_string(32, &Charset::Alphanumeric)?,
                gen.generate_string(32, &Charset::Alphanumeric)?
            );
        }
        Ok(())
    }

    #[test]
    fn number_covers_full_range() -> Result<(), Error> {
        let mut gen = Generator::new(OsEntropy::new());
        let (mut seen_min, mut seen_max) = (false, false);
        for _ in 0..2000 {
            let n = gen.generate_number(3)?;
            assert!(n <= 7);
            seen_min |= n == 0;
            seen_max |= n == 7;
        }
        assert!(seen_min && seen_max);
        Ok(())
    }

    #[test]
    fn number_masks_unused_bits() -> Result<(), Error> {
        let mut gen = Generator::with_level(MockEntropy::constant(0xff), SecurityLevel::Medium);
        assert_eq!(gen.generate_number(12)?, 4095);
        assert_eq!(gen.generate_number(1)?, 1);
        assert_eq!(gen.generate_number(64)?, u64::MAX as u128);
        assert_eq!(gen.generate_number(128)?, u128::MAX);

        let bytes = gen.generate_number_bytes(201)?;
        assert_eq!(bytes.len(), 26);
        assert_eq!(bytes[0], 0x01);
        assert!(bytes[1..].iter().all(|&b| b == 0xff));
        Ok(())
    }

    #[test]
    fn unused_bits_at_the_widest_widths() {
        assert_eq!(unused_high_bits(1), 7);
        assert_eq!(unused_high_bits(8), 0);
        assert_eq!(unused_high_bits(12), 4);
        assert_eq!(unused_high_bits(201), 7);
        assert_eq!(unused_high_bits(u32::MAX - 7), 0);
        assert_eq!(unused_high_bits(u32::MAX - 6), 7);
        assert_eq!(unused_high_bits(u32::MAX), 1);
    }

    #[test]
    fn number_is_big_endian() -> Result<(), Error> {
        let mut gen = Generator::with_level(MockEntropy::counting(), SecurityLevel::Medium);
        assert_eq!(gen.generate_number(16)?, 0x0001);
        assert_eq!(gen.generate_number(24)?, 0x02_03_04);
        Ok(())
    }

    #[test]
    fn bad_bit_widths() {
        let mut gen = Generator::new(OsEntropy::new());
        assert_eq!(
            gen.generate_number(0),
            Err(Error::InvalidBitWidth { bits: 0, max: 128 })
        );
        assert_eq!(
            gen.generate_number(129),
            Err(Error::InvalidBitWidth { bits: 129, max: 128 })
        );
        assert!(matches!(
            gen.generate_number_bytes(0),
            Err(Error::InvalidBitWidth { bits: 0, .. })
        ));
    }

    #[test]
    fn entropy_failure_surfaces() {
        let mut gen = Generator::with_level(BrokenEntropy, SecurityLevel::Medium);
        assert!(matches!(
            gen.generate_bytes(8),
            Err(Error::EntropyUnavailable(_))
        ));
        assert!(matches!(
            gen.generate_string(8, &Charset::Digits),
            Err(Error::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn builder_adds_passes() -> Result<(), Error> {
        let mut entropy = MockEntropy::counting();
        let mut gen = GeneratorBuilder::new(&mut entropy)
            .security_level(SecurityLevel::High)
            .mix_passes(5)
            .build();
        assert_eq!(gen.security_level(), SecurityLevel::High);
        gen.generate_bytes(16)?;
        drop(gen);
        assert_eq!(entropy.calls, 6);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn builder_cannot_weaken_level() {
        let _ = GeneratorBuilder::new(OsEntropy::new())
            .security_level(SecurityLevel::Paranoid)
            .mix_passes(1)
            .build();
    }

    #[test]
    #[should_panic]
    fn builder_caps_passes() {
        let _ = GeneratorBuilder::new(OsEntropy::new()).mix_passes(17);
    }
}
