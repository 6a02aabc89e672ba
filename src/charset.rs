// SPDX-License-Identifier: MIT

//! Named and caller-supplied symbol alphabets.
use crate::error::{Error, Result};

use alloc::{string::ToString, vec::Vec};
use core::str::FromStr;

macro_rules! letters {
    () => {
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
    };
}

macro_rules! digits {
    () => {
        "0123456789"
    };
}

macro_rules! special {
    () => {
        "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"
    };
}

pub(crate) const LETTERS: &str = letters!();
pub(crate) const DIGITS: &str = digits!();
pub(crate) const SPECIAL: &str = special!();
pub(crate) const PRINTABLE: &str = concat!(letters!(), digits!(), special!());

const HEX: &str = "0123456789abcdef";
const ALPHANUMERIC: &str = concat!(letters!(), digits!());
const BASE64: &str = concat!(letters!(), digits!(), "+/");
const URL_SAFE: &str = concat!(letters!(), digits!(), "-_");

/// The alphabet a string is drawn from.
///
/// Built-in variants are fixed ASCII alphabets. [`Charset::Custom`]
/// carries caller-supplied symbols, which are de-duplicated (first
/// occurrence wins) when resolved and must leave at least two distinct
/// symbols.
///
/// ```
/// use cryptostrings::Charset;
///
/// assert_eq!(Charset::Hex.len(), Some(16));
/// let vowels: Charset = Charset::custom("aeiou");
/// assert_eq!(vowels.symbols().unwrap().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Charset {
    /// `0-9a-f`
    Hex,
    /// `0-9`
    Digits,
    /// `A-Za-z`
    Ascii,
    /// `A-Za-z0-9`
    Alphanumeric,
    /// `A-Za-z0-9+/`
    Base64,
    /// `A-Za-z0-9-_`
    UrlSafe,
    /// Letters, digits and the 32 ASCII punctuation characters.
    Printable,
    /// Caller-supplied symbols.
    Custom(Vec<char>),
}

impl Charset {
    pub const BUILTIN: [Charset; 7] = [
        Self::Hex,
        Self::Digits,
        Self::Ascii,
        Self::Alphanumeric,
        Self::Base64,
        Self::UrlSafe,
        Self::Printable,
    ];

    pub fn custom(symbols: &str) -> Self {
        Self::Custom(symbols.chars().collect())
    }

    /// Resolve a charset by name. `custom` selects `custom_symbols`.
    ///
    /// # Error
    ///
    /// Returns [`Error::UnknownCharset`] if `name` is not recognized,
    /// or is `custom` with no symbols supplied.
    pub fn resolve(name: &str, custom_symbols: Option<&str>) -> Result<Self> {
        match (name, custom_symbols) {
            ("custom", Some(symbols)) => Ok(Self::custom(symbols)),
            _ => name.parse(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Digits => "digits",
            Self::Ascii => "ascii",
            Self::Alphanumeric => "alphanumeric",
            Self::Base64 => "base64",
            Self::UrlSafe => "url_safe",
            Self::Printable => "printable",
            Self::Custom(_) => "custom",
        }
    }

    fn builtin(&self) -> Option<&'static str> {
        let symbols = match self {
            Self::Hex => HEX,
            Self::Digits => DIGITS,
            Self::Ascii => LETTERS,
            Self::Alphanumeric => ALPHANUMERIC,
            Self::Base64 => BASE64,
            Self::UrlSafe => URL_SAFE,
            Self::Printable => PRINTABLE,
            Self::Custom(_) => return None,
        };
        Some(symbols)
    }

    /// Number of symbols in a built-in charset. `None` for custom
    /// charsets, whose size is only known once de-duplicated.
    pub fn len(&self) -> Option<usize> {
        self.builtin().map(str::len)
    }

    /// The validated, de-duplicated symbol sequence.
    ///
    /// # Error
    ///
    /// Returns [`Error::InvalidCharset`] if fewer than two distinct
    /// symbols remain.
    pub fn symbols(&self) -> Result<Vec<char>> {
        let symbols = match self {
            Self::Custom(chars) => {
                let mut distinct = Vec::with_capacity(chars.len());
                for c in chars {
                    if !distinct.contains(c) {
                        distinct.push(*c);
                    }
                }
                distinct
            }
            named => named.builtin().unwrap_or_default().chars().collect(),
        };
        if symbols.len() < 2 {
            return Err(Error::InvalidCharset {
                distinct: symbols.len(),
            });
        }
        Ok(symbols)
    }

    /// Entropy carried by a string of `length` symbols, in bits.
    ///
    /// # Error
    ///
    /// Same as [`Charset::symbols`].
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn entropy_bits(&self, length: usize) -> Result<f64> {
        let k = self.symbols()?.len() as f64;
        Ok(length as f64 * k.log2())
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::BUILTIN
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCharset(s.to_string()))
    }
}

/// Character classes the password composer balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    Letter,
    Digit,
    Special,
}

impl Class {
    pub(crate) fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_ascii_alphabetic() {
            Self::Letter
        } else {
            Self::Special
        }
    }

    pub(crate) fn symbols(self) -> Vec<char> {
        match self {
            Self::Letter => LETTERS,
            Self::Digit => DIGITS,
            Self::Special => SPECIAL,
        }
        .chars()
        .collect()
    }
}
