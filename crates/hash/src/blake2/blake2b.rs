// Copyright 2025 Irreducible Inc.
//! BLAKE2b: 64-bit words, 128-byte blocks, 12 rounds (RFC 7693).

use std::array;

use zeroize::Zeroize;

use super::{
	Blake2, Blake2Core, Blake2Opts,
	constants::{IV_B, PARAM_FANOUT_DEPTH, SIGMA},
};
use crate::error::Result;

const ROUNDS: usize = 12;

/// Rotation constants for the G mixing function
const R1: u32 = 32;
const R2: u32 = 24;
const R3: u32 = 16;
const R4: u32 = 63;

/// G mixing function - the core primitive of BLAKE2b
///
/// Performs 8 operations mixing two input words with the state
#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(R1);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(R2);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(R3);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(R4);
}

fn le_words(bytes: &[u8]) -> impl Iterator<Item = u64> + '_ {
	bytes
		.chunks_exact(8)
		.map(|chunk| u64::from_le_bytes(array::from_fn(|i| chunk[i])))
}

/// BLAKE2b chaining state.
#[derive(Clone)]
pub struct Blake2bCore {
	h: [u64; 8],
}

impl Zeroize for Blake2bCore {
	fn zeroize(&mut self) {
		self.h.zeroize();
	}
}

impl Blake2Core for Blake2bCore {
	type Word = u64;
	type Block = [u32; 32];

	const BLOCK_LEN: usize = 128;
	const KEY_LEN: usize = 64;
	const SALT_LEN: usize = 16;
	const PERS_LEN: usize = 16;

	fn new(
		output_len: usize,
		key_len: usize,
		salt: Option<&[u8]>,
		personalization: Option<&[u8]>,
	) -> Self {
		let mut h = IV_B;
		// Parameter block: 0x0101kknn where nn = output length, kk = key length
		h[0] ^= output_len as u64 | (key_len as u64) << 8 | PARAM_FANOUT_DEPTH as u64;
		if let Some(salt) = salt {
			for (word, salt) in h[4..6].iter_mut().zip(le_words(salt)) {
				*word ^= salt;
			}
		}
		if let Some(personalization) = personalization {
			for (word, pers) in h[6..8].iter_mut().zip(le_words(personalization)) {
				*word ^= pers;
			}
		}
		Self { h }
	}

	fn compress(&mut self, msg: &[u32], is_last: bool, length: u128) {
		debug_assert_eq!(msg.len(), 32);
		// Message words are pairs of little-endian half-words
		let m: [u64; 16] = array::from_fn(|i| {
			u32::from_le(msg[2 * i]) as u64 | (u32::from_le(msg[2 * i + 1]) as u64) << 32
		});

		let mut v = [0u64; 16];
		v[..8].copy_from_slice(&self.h);
		v[8..].copy_from_slice(&IV_B);
		// 128-bit byte counter
		v[12] ^= length as u64;
		v[13] ^= (length >> 64) as u64;
		if is_last {
			v[14] = !v[14];
		}

		for s in &SIGMA[..ROUNDS] {
			// Column step (mix columns of the 4x4 matrix)
			g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
			g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
			g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
			g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
			// Diagonal step (mix diagonals of the 4x4 matrix)
			g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
			g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
			g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
			g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
		}

		for i in 0..8 {
			self.h[i] ^= v[i] ^ v[i + 8];
		}
	}

	fn get(&self) -> [u64; 8] {
		self.h
	}

	fn set(&mut self, words: &[u64; 8]) {
		self.h = *words;
	}
}

pub type Blake2b = Blake2<Blake2bCore>;

/// BLAKE2b of `data` with the given options.
#[tracing::instrument(level = "trace", skip_all)]
pub fn blake2b(data: impl AsRef<[u8]>, opts: &Blake2Opts) -> Result<Vec<u8>> {
	let mut hasher = Blake2b::new(opts)?;
	hasher.absorb(data.as_ref());
	let mut out = vec![0u8; hasher.output_len];
	hasher.finalize_into(&mut out);
	Ok(out)
}

/// Unkeyed BLAKE2b with the full 64-byte output.
#[tracing::instrument(level = "trace", skip_all)]
pub fn blake2b_512(data: impl AsRef<[u8]>) -> [u8; 64] {
	let mut hasher = Blake2b::with_output_len(64);
	hasher.absorb(data.as_ref());
	let mut out = [0u8; 64];
	hasher.finalize_into(&mut out);
	out
}
