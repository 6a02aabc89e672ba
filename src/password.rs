// SPDX-License-Identifier: MIT

//! Password composition with per-class minimums.
use crate::{
    charset::{Charset, Class},
    entropy::Entropy,
    error::{Error, Result},
    generator::Generator,
    sampler::Sampler,
};

use alloc::{string::String, vec::Vec};

/// Shape of a generated password.
///
/// Passwords are drawn from the printable charset, then patched until
/// they hold at least `min_digits` digits and `min_special` ASCII
/// punctuation characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub min_digits: usize,
    pub min_special: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            min_digits: 1,
            min_special: 1,
        }
    }
}

impl PasswordPolicy {
    pub fn new(length: usize, min_digits: usize, min_special: usize) -> Self {
        Self {
            length,
            min_digits,
            min_special,
        }
    }

    /// Check the policy can be satisfied.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidLength`] for a zero length and
    /// [`Error::InfeasibleConstraints`] when the minimums do not fit.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(Error::InvalidLength);
        }
        match self.min_digits.checked_add(self.min_special) {
            Some(required) if required <= self.length => Ok(()),
            _ => Err(self.infeasible()),
        }
    }

    fn infeasible(&self) -> Error {
        Error::InfeasibleConstraints {
            length: self.length,
            min_digits: self.min_digits,
            min_special: self.min_special,
        }
    }

    fn minimum(&self, class: Class) -> usize {
        match class {
            Class::Letter => 0,
            Class::Digit => self.min_digits,
            Class::Special => self.min_special,
        }
    }
}

/// Per-class symbol counts, indexed by [`Class`].
struct Tally([usize; 3]);

impl Tally {
    fn of(chars: &[char]) -> Self {
        let mut tally = Self([0; 3]);
        chars.iter().for_each(|c| tally.0[Class::of(*c) as usize] += 1);
        tally
    }

    fn get(&self, class: Class) -> usize {
        self.0[class as usize]
    }

    fn moved(&mut self, from: Class, to: Class) {
        self.0[from as usize] -= 1;
        self.0[to as usize] += 1;
    }
}

impl<E> Generator<E>
where
    E: Entropy,
{
    /// A password satisfying `policy`.
    ///
    /// Positions to patch are picked uniformly among those whose class
    /// can spare a symbol, and replacement symbols are drawn uniformly
    /// from the deficient class.
    ///
    /// # Example
    ///
    /// ```
    /// use cryptostrings::{entropy::OsEntropy, Generator, PasswordPolicy};
    ///
    /// # fn main() -> Result<(), cryptostrings::Error> {
    /// let mut gen = Generator::new(OsEntropy::default());
    /// let password = gen.generate_password(&PasswordPolicy::new(20, 3, 3))?;
    /// assert_eq!(password.len(), 20);
    /// assert!(password.chars().filter(char::is_ascii_digit).count() >= 3);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Error
    ///
    /// Returns the validation errors of [`PasswordPolicy::validate`],
    /// or an error from the entropy source.
    pub fn generate_password(&mut self, policy: &PasswordPolicy) -> Result<String> {
        policy.validate()?;
        let alphabet = Charset::Printable.symbols()?;
        let level = self.security_level();

        let mut source = self.mixed();
        let mut sampler = Sampler::new(&mut source, policy.length * 2);
        let mut chars = (0..policy.length)
            .map(|_| sampler.symbol(&alphabet))
            .collect::<Result<Vec<char>>>()?;

        let mut tally = Tally::of(&chars);
        let mut replaced = 0;
        for class in [Class::Digit, Class::Special] {
            let wanted = policy.minimum(class);
            if tally.get(class) >= wanted {
                continue;
            }
            let replacements = class.symbols();
            // positions whose class can spare a symbol
            let mut eligible: Vec<usize> = (0..chars.len())
                .filter(|&i| {
                    let other = Class::of(chars[i]);
                    other != class && tally.get(other) > policy.minimum(other)
                })
                .collect();
            while tally.get(class) < wanted {
                if eligible.is_empty() {
                    return Err(policy.infeasible());
                }
                let pos = eligible.swap_remove(sampler.index(eligible.len())?);
                let other = Class::of(chars[pos]);
                chars[pos] = sampler.symbol(&replacements)?;
                tally.moved(other, class);
                replaced += 1;
                if tally.get(other) == policy.minimum(other) {
                    eligible.retain(|&i| Class::of(chars[i]) != other);
                }
            }
        }
        log::debug!(
            "composed {} char password at {} level, {} position(s) patched",
            policy.length,
            level,
            replaced
        );
        Ok(chars.into_iter().collect())
    }
}
