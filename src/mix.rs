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
//! The one-way mixing function behind the higher security levels.
//!
//! Each pass hashes the running buffer with SHA-256 into an AES-256
//! key, draws fresh entropy of the same length, and replaces the
//! running buffer with the fresh bytes XOR the AES-256 counter-mode
//! keystream under that key. A pass keeps every bit of its fresh draw,
//! while a stuck or predictable draw is still masked by up to 256 bits
//! carried over from the running buffer.
use crate::{entropy::Entropy, error::Result, level::MixPolicy};

use aes::{
    cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit, KeySizeUser},
    Aes256Enc, Block,
};
use alloc::vec;
use sha2::{Digest, Sha256};

type Key = GenericArray<u8, <Aes256Enc as KeySizeUser>::KeySize>;

const DOMAIN: &[u8] = b"cryptostrings/mix/v1";

/// Increment a slice of bytes by 1 in big-endian order.
fn inc_bytes(block: &mut [u8]) {
    for bit in block.iter_mut().rev() {
        if *bit == 0xff {
            *bit = 0;
        } else {
            *bit += 1;
            break;
        }
    }
}

fn wipe(bytes: &mut [u8]) {
    bytes.iter_mut().for_each(|v| *v = 0);
}

/// Key and counter state for a single mixing pass.
struct Mixer {
    key: Key,
    v_blk: Block,
    tmp_blk: Block,
}

impl Drop for Mixer {
    fn drop(&mut self) {
        wipe(&mut self.key);
        wipe(&mut self.v_blk);
        wipe(&mut self.tmp_blk);
    }
}

impl Mixer {
    fn new(pass: u32, running: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(pass.to_be_bytes());
        hasher.update((running.len() as u64).to_be_bytes());
        hasher.update(running);
        let mut digest = hasher.finalize();
        let key = Key::clone_from_slice(&digest);
        wipe(&mut digest);
        Self {
            key,
            v_blk: Block::default(),
            tmp_blk: Block::default(),
        }
    }

    /// Write `fresh` XOR keystream into `bytes`.
    ///
    /// `fresh` and `bytes` must have the same length.
    fn combine(&mut self, fresh: &[u8], bytes: &mut [u8]) {
        debug_assert_eq!(fresh.len(), bytes.len());
        let cipher = Aes256Enc::new(&self.key);
        let blk_len = self.tmp_blk.len();
        for (blk, src) in bytes.chunks_mut(blk_len).zip(fresh.chunks(blk_len)) {
            inc_bytes(&mut self.v_blk);
            self.tmp_blk.copy_from_slice(&self.v_blk);
            cipher.encrypt_block(&mut self.tmp_blk);
            for ((b, f), k) in blk.iter_mut().zip(src).zip(self.tmp_blk.iter()) {
                *b = f ^ k;
            }
        }
    }
}

/// Fill `bytes` from `entropy`, then apply `policy.passes` mixing
/// passes, each with its own fresh draw.
///
/// # Error
///
/// Returns an error when there is a problem reading from the entropy
/// source. `bytes` holds no usable output in that case.
pub(crate) fn fill_mixed<E>(entropy: &mut E, policy: MixPolicy, bytes: &mut [u8]) -> Result<()>
where
    E: Entropy,
{
    entropy.fill_bytes(bytes)?;
    if policy.passes == 0 {
        return Ok(());
    }

    let mut fresh = vec![0u8; bytes.len()];
    let mut result = Ok(());
    for pass in 0..policy.passes {
        result = entropy.fill_bytes(&mut fresh);
        if result.is_err() {
            break;
        }
        Mixer::new(pass, bytes).combine(&fresh, bytes);
    }
    wipe(&mut fresh);
    if result.is_err() {
        wipe(bytes);
    }
    result
}
