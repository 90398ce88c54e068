// Copyright 2025 Irreducible Inc.
//! BLAKE2s: 32-bit words, 64-byte blocks, 10 rounds (RFC 7693).

use std::array;

use zeroize::Zeroize;

use super::{
	Blake2, Blake2Core, Blake2Opts,
	constants::{IV_S, PARAM_FANOUT_DEPTH, SIGMA},
};
use crate::error::Result;

const ROUNDS: usize = 10;

/// Rotation constants for the G mixing function
const R1: u32 = 16;
const R2: u32 = 12;
const R3: u32 = 8;
const R4: u32 = 7;

/// G mixing function, mixing two message words into four state words.
#[inline(always)]
fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(R1);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(R2);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(R3);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(R4);
}

/// Little-endian words of a byte string whose length is a multiple of 4.
fn le_words(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
	bytes
		.chunks_exact(4)
		.map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// BLAKE2s chaining state.
#[derive(Clone)]
pub struct Blake2sCore {
	h: [u32; 8],
}

impl Zeroize for Blake2sCore {
	fn zeroize(&mut self) {
		self.h.zeroize();
	}
}

impl Blake2Core for Blake2sCore {
	type Word = u32;
	type Block = [u32; 16];

	const BLOCK_LEN: usize = 64;
	const KEY_LEN: usize = 32;
	const SALT_LEN: usize = 8;
	const PERS_LEN: usize = 8;

	fn new(
		output_len: usize,
		key_len: usize,
		salt: Option<&[u8]>,
		personalization: Option<&[u8]>,
	) -> Self {
		let mut h = IV_S;
		h[0] ^= output_len as u32 | (key_len as u32) << 8 | PARAM_FANOUT_DEPTH;
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
		debug_assert_eq!(msg.len(), 16);
		let m: [u32; 16] = array::from_fn(|i| u32::from_le(msg[i]));

		let mut v = [0u32; 16];
		v[..8].copy_from_slice(&self.h);
		v[8..].copy_from_slice(&IV_S);
		// 64-bit byte counter
		v[12] ^= length as u32;
		v[13] ^= (length >> 32) as u32;
		if is_last {
			v[14] = !v[14];
		}

		for s in &SIGMA[..ROUNDS] {
			// Columns
			g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
			g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
			g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
			g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
			// Diagonals
			g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
			g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
			g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
			g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
		}

		for i in 0..8 {
			self.h[i] ^= v[i] ^ v[i + 8];
		}
	}

	fn get(&self) -> [u32; 8] {
		self.h
	}

	fn set(&mut self, words: &[u32; 8]) {
		self.h = *words;
	}
}

pub type Blake2s = Blake2<Blake2sCore>;

/// BLAKE2s of `data` with the given options.
#[tracing::instrument(level = "trace", skip_all)]
pub fn blake2s(data: impl AsRef<[u8]>, opts: &Blake2Opts) -> Result<Vec<u8>> {
	let mut hasher = Blake2s::new(opts)?;
	hasher.absorb(data.as_ref());
	let mut out = vec![0u8; hasher.output_len];
	hasher.finalize_into(&mut out);
	Ok(out)
}

/// Unkeyed BLAKE2s with the full 32-byte output.
#[tracing::instrument(level = "trace", skip_all)]
pub fn blake2s_256(data: impl AsRef<[u8]>) -> [u8; 32] {
	let mut hasher = Blake2s::with_output_len(32);
	hasher.absorb(data.as_ref());
	let mut out = [0u8; 32];
	hasher.finalize_into(&mut out);
	out
}
