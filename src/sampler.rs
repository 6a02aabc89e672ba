// SPDX-License-Identifier: MIT

//! Rejection sampling of symbols and indices.
//!
//! Reducing a random byte modulo `k` favours the low residues whenever
//! `k` does not divide 256. The sampler instead accepts a byte only if
//! it falls below the largest multiple of `k` not exceeding 256 (the
//! acceptance threshold) and discards it otherwise, so every residue
//! is hit by exactly the same number of byte values.
//!
//! ```
//! use cryptostrings::sampler::acceptance_threshold;
//!
//! // 62 symbols: bytes 248..=255 are discarded.
//! assert_eq!(acceptance_threshold(62), 248);
//! // 64 divides 256, nothing is discarded.
//! assert_eq!(acceptance_threshold(64), 256);
//! ```
use crate::{
    entropy::Entropy,
    error::{Error, Result},
};

use alloc::{string::String, vec, vec::Vec};

const MIN_POOL_LEN: usize = 32;

/// Largest multiple of `k` that does not exceed 256.
///
/// # Panics
///
/// Panics if `k` is zero or greater than 256.
pub fn acceptance_threshold(k: usize) -> usize {
    assert!(k > 0 && k <= 256, "threshold is only defined for 1..=256");
    256 - 256 % k
}

/// Draws uniformly distributed symbols and indices from a byte source.
///
/// Bytes are pulled from the source in batches into an internal pool,
/// sized from the caller's estimate plus headroom for rejected draws.
/// Consumed pool bytes are cleared, and the pool is wiped on drop.
pub struct Sampler<'a, S> {
    source: &'a mut S,
    pool: Vec<u8>,
    pos: usize,
    rejected: usize,
}

impl<S> Drop for Sampler<'_, S> {
    fn drop(&mut self) {
        self.pool.iter_mut().for_each(|v| *v = 0);
    }
}

impl<'a, S> Sampler<'a, S>
where
    S: Entropy,
{
    /// Create a sampler expecting to consume about `expected` bytes.
    pub fn new(source: &'a mut S, expected: usize) -> Self {
        let len = expected.saturating_add(expected / 4).max(MIN_POOL_LEN);
        Self {
            source,
            pool: vec![0u8; len],
            pos: len,
            rejected: 0,
        }
    }

    /// Number of draws discarded so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pos == self.pool.len() {
            self.source.fill_bytes(&mut self.pool)?;
            self.pos = 0;
        }
        let byte = self.pool[self.pos];
        self.pool[self.pos] = 0;
        self.pos += 1;
        Ok(byte)
    }

    fn next_u64(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        for b in bytes.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(u64::from_be_bytes(bytes))
    }

    /// Uniform index in `[0, bound)`.
    ///
    /// Bounds up to 256 cost one byte per attempt; larger bounds draw
    /// 64-bit words under the same threshold rule over 2^64.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn index(&mut self, bound: usize) -> Result<usize> {
        assert!(bound > 0, "cannot sample from an empty range");
        if bound <= 256 {
            let threshold = acceptance_threshold(bound);
            loop {
                let byte = self.next_byte()? as usize;
                if byte < threshold {
                    return Ok(byte % bound);
                }
                self.rejected += 1;
            }
        }

        let bound = bound as u64;
        // 2^64 mod bound, computed without overflowing
        let excess = (u64::MAX % bound + 1) % bound;
        loop {
            let word = self.next_u64()?;
            if word <= u64::MAX - excess {
                return Ok((word % bound) as usize);
            }
            self.rejected += 1;
        }
    }

    /// One symbol chosen uniformly from `symbols`.
    pub fn symbol(&mut self, symbols: &[char]) -> Result<char> {
        Ok(symbols[self.index(symbols.len())?])
    }
}

/// Bytes one symbol attempt costs for an alphabet of `k` symbols.
pub(crate) fn draw_width(k: usize) -> usize {
    if k <= 256 {
        1
    } else {
        8
    }
}

/// Draw `length` symbols from `symbols`, each with probability
/// exactly `1 / symbols.len()`.
///
/// # Error
///
/// Returns [`Error::InvalidLength`] if `length` is zero,
/// [`Error::InvalidCharset`] if `symbols` holds fewer than two
/// entries, or any error from `source`.
pub fn sample<S>(symbols: &[char], length: usize, source: &mut S) -> Result<String>
where
    S: Entropy,
{
    if length == 0 {
        return Err(Error::InvalidLength);
    }
    if symbols.len() < 2 {
        return Err(Error::InvalidCharset {
            distinct: symbols.len(),
        });
    }

    let mut sampler = Sampler::new(source, length * draw_width(symbols.len()));
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        out.push(sampler.symbol(symbols)?);
    }
    log::debug!(
        "sampled {} symbols over alphabet of {}, {} draw(s) rejected",
        length,
        symbols.len(),
        sampler.rejected()
    );
    Ok(out)
}
