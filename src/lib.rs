// SPDX-License-Identifier: MIT

//! Cryptographically secure random values for tokens, identifiers and
//! secrets: raw bytes, strings over configurable charsets, bounded
//! integers, passwords and prefixed API keys.
//!
//! All randomness comes from the operating system through
//! [`getrandom`]. Strings are rejection-sampled so every symbol of a
//! charset is exactly equiprobable, whatever the charset size. A
//! [`SecurityLevel`] adds one-way mixing passes over fresh entropy as
//! defense-in-depth against a weak OS pool; it never changes output
//! length or distribution.
//!
//! # Quick Example
//!
//! The simplest way to generate values is the free functions, which
//! draw from the process-wide OS entropy source. The `std` feature is
//! required for this approach.
//!
//! ```
//! # #[cfg(feature = "std")]
//! use cryptostrings::{generate_api_key, generate_string, Charset, SecurityLevel};
//!
//! # fn main() -> Result<(), cryptostrings::Error> {
//! # #[cfg(feature = "std")]
//! # {
//! let session = generate_string(64, &Charset::UrlSafe, SecurityLevel::High)?;
//! let key = generate_api_key("svc", 32, SecurityLevel::Paranoid)?;
//! # }
//! # Ok(())
//! # }
//! ```
//!
//! Otherwise a [`Generator`] may be constructed by hand over any
//! [`Entropy`](entropy::Entropy) source, directly or through
//! [`GeneratorBuilder`]. This approach doesn't require the `std`
//! feature.
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

pub mod apikey;
pub mod charset;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod level;
mod mix;
pub mod password;
pub mod sampler;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod global;

pub use charset::Charset;
pub use error::{Error, Result};
pub use generator::{Generator, GeneratorBuilder};
pub use level::{MixPolicy, SecurityLevel};
pub use password::PasswordPolicy;

#[cfg(feature = "std")]
pub use global::{
    generate_api_key, generate_bytes, generate_number, generate_number_bytes, generate_password,
    generate_string,
};
