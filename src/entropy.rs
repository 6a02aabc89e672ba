//
// Copyright (c) 2023 Daniel Ottavio
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE
//
//! Traits and types for defining entropy sources.
use crate::error::{Error, Result};

/// Represents a source of cryptographically secure random data. Every
/// generator in this crate draws its raw bytes through this trait.
pub trait Entropy {
    /// Fill `bytes` with random data from the entropy source.
    ///
    /// # Error
    ///
    /// Returns [`Error::EntropyUnavailable`] if there is a problem with
    /// the underlying entropy source.
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<()>;
}

impl<E> Entropy for &mut E
where
    E: Entropy + ?Sized,
{
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(bytes)
    }
}

/// An entropy source that draws random data from the host operating
/// system.
///
/// ```
/// use cryptostrings::entropy::{OsEntropy, Entropy};
///
/// # use cryptostrings::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut entropy = OsEntropy::default();
/// let mut random_data = [0u8; 32];
/// entropy.fill_bytes(&mut random_data)?;
/// #
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy {}

impl OsEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a handle to the process-wide OS entropy source.
    ///
    /// The first call probes the OS facility once; every later call,
    /// from any thread, reads the cached outcome without locking. A
    /// failed probe stays failed for the life of the process.
    ///
    /// The probe may block briefly if the OS entropy pool has not been
    /// seeded yet at early boot.
    ///
    /// # Error
    ///
    /// Returns [`Error::EntropyUnavailable`] if the probe failed.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn shared() -> Result<Self> {
        use std::sync::OnceLock;

        static PROBE: OnceLock<Result<()>> = OnceLock::new();

        PROBE
            .get_or_init(|| {
                let mut probe = [0u8; 1];
                let result = getrandom::getrandom(&mut probe).map_err(Error::entropy);
                match &result {
                    Ok(()) => log::trace!("os entropy source initialized"),
                    Err(e) => log::error!("os entropy source unavailable: {}", e),
                }
                result
            })
            .clone()
            .map(|()| Self::default())
    }
}

impl Entropy for OsEntropy {
    /// Fill `bytes` with random data from the operating system using
    /// [`getrandom`](getrandom::getrandom).
    ///
    /// # Error
    ///
    /// Returns any error from `getrandom` as
    /// [`Error::EntropyUnavailable`].
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        getrandom::getrandom(bytes).map_err(Error::entropy)
    }
}


#[cfg(test)]
mod tests {
    use super::{Entropy, OsEntropy};
    use crate::error::Error;

    #[test]
    fn os_entropy_fills() -> Result<(), Error> {
        let mut entropy = OsEntropy::new();
        let mut buf = [0u8; 32];
        entropy.fill_bytes(&mut buf)?;
        assert_ne!([0u8; 32], buf);
        Ok(())
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_handle_is_idempotent() -> Result<(), Error> {
        let mut a = OsEntropy::shared()?;
        let mut b = OsEntropy::shared()?;
        let (mut x, mut y) = ([0u8; 16], [0u8; 16]);
        a.fill_bytes(&mut x)?;
        b.fill_bytes(&mut y)?;
        assert_ne!(x, y);
        Ok(())
    }
}
