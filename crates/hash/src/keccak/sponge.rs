// Copyright 2025 Irreducible Inc.

//! Sponge construction over Keccak-f\[1600\].
//!
//! Input is XORed into the first `rate` bytes of the state, the permutation is applied whenever
//! that window fills up, and output is read back from the same window. Finalization appends the
//! domain separation suffix and the closing bit of the pad10*1 padding.

use std::fmt;

use zeroize::Zeroize;

use super::{
	constants::{ROUNDS, STATE_BYTES, STATE_WORDS},
	permutation::keccak_p,
};
use crate::{
	error::{Error, Result},
	hasher::{HashXof, StreamingHash},
};

#[inline(always)]
fn xor_byte(state: &mut [u32; STATE_WORDS], index: usize, byte: u8) {
	state[index / 4] ^= (byte as u32) << (8 * (index % 4));
}

#[inline(always)]
fn read_byte(state: &[u32; STATE_WORDS], index: usize) -> u8 {
	(state[index / 4] >> (8 * (index % 4))) as u8
}

/// A Keccak sponge instance: SHA3, legacy Keccak and SHAKE are all parameterizations of it.
#[derive(Clone)]
pub struct Keccak {
	state: [u32; STATE_WORDS],
	rate: usize,
	suffix: u8,
	output_len: usize,
	rounds: usize,
	enable_xof: bool,
	pos: usize,
	pos_out: usize,
	finished: bool,
	destroyed: bool,
}

impl Keccak {
	/// Creates a sponge with the given parameters, all lengths in bytes.
	///
	/// ## Arguments
	///
	/// * `rate` - block length, `1..200`
	/// * `suffix` - domain separation bits XORed in before the final permutation
	/// * `output_len` - length of the digest returned by `digest`
	/// * `enable_xof` - whether `xof`/`xof_into` are permitted
	/// * `rounds` - permutation rounds, `1..=24`. Anything below 24 is not a security-reviewed
	///   configuration.
	pub fn new(
		rate: usize,
		suffix: u8,
		output_len: usize,
		enable_xof: bool,
		rounds: usize,
	) -> Result<Self> {
		if rate == 0 || rate >= STATE_BYTES {
			tracing::debug!(rate, "rejected sponge rate");
			return Err(Error::InvalidRate { rate });
		}
		if rounds == 0 || rounds > ROUNDS {
			tracing::debug!(rounds, "rejected sponge round count");
			return Err(Error::InvalidRounds { rounds });
		}
		Ok(Self::with_params(rate, suffix, output_len, enable_xof, rounds))
	}

	/// Constructor for parameter sets already known to be valid.
	pub(crate) const fn with_params(
		rate: usize,
		suffix: u8,
		output_len: usize,
		enable_xof: bool,
		rounds: usize,
	) -> Self {
		debug_assert!(rate > 0 && rate < STATE_BYTES);
		debug_assert!(rounds > 0 && rounds <= ROUNDS);
		Self {
			state: [0; STATE_WORDS],
			rate,
			suffix,
			output_len,
			rounds,
			enable_xof,
			pos: 0,
			pos_out: 0,
			finished: false,
			destroyed: false,
		}
	}

	pub fn rate(&self) -> usize {
		self.rate
	}

	pub fn suffix(&self) -> u8 {
		self.suffix
	}

	pub fn rounds(&self) -> usize {
		self.rounds
	}

	pub fn is_xof(&self) -> bool {
		self.enable_xof
	}

	pub fn is_finished(&self) -> bool {
		self.finished
	}

	pub fn is_destroyed(&self) -> bool {
		self.destroyed
	}

	fn permute(&mut self) {
		keccak_p(&mut self.state, self.rounds);
		self.pos = 0;
		self.pos_out = 0;
	}

	/// XORs `data` into the rate window, permuting each time the window fills up.
	pub(crate) fn absorb(&mut self, mut data: &[u8]) {
		while !data.is_empty() {
			let take = usize::min(self.rate - self.pos, data.len());
			let (chunk, rest) = data.split_at(take);
			self.absorb_chunk(chunk);
			data = rest;
			if self.pos == self.rate {
				self.permute();
			}
		}
	}

	/// XORs a chunk that fits in the remaining rate window, a half-word at a time where the
	/// cursor is word aligned.
	fn absorb_chunk(&mut self, mut chunk: &[u8]) {
		while self.pos % 4 != 0 {
			let Some((&byte, rest)) = chunk.split_first() else {
				return;
			};
			xor_byte(&mut self.state, self.pos, byte);
			self.pos += 1;
			chunk = rest;
		}

		let mut words = chunk.chunks_exact(4);
		for word in &mut words {
			self.state[self.pos / 4] ^= u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
			self.pos += 4;
		}
		for &byte in words.remainder() {
			xor_byte(&mut self.state, self.pos, byte);
			self.pos += 1;
		}
	}

	/// Applies the suffix and padding and permutes. Runs at most once.
	fn finish(&mut self) {
		if self.finished {
			return;
		}
		self.finished = true;

		xor_byte(&mut self.state, self.pos, self.suffix);
		if self.suffix & 0x80 != 0 && self.pos == self.rate - 1 {
			self.permute();
		}
		xor_byte(&mut self.state, self.rate - 1, 0x80);
		self.permute();
	}

	/// Finishes if necessary and copies the next `out.len()` bytes of output.
	pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
		self.finish();
		let mut written = 0;
		while written < out.len() {
			if self.pos_out >= self.rate {
				self.permute();
			}
			let take = usize::min(self.rate - self.pos_out, out.len() - written);
			for (i, byte) in out[written..written + take].iter_mut().enumerate() {
				*byte = read_byte(&self.state, self.pos_out + i);
			}
			self.pos_out += take;
			written += take;
		}
	}

	fn ensure_not_destroyed(&self) -> Result<()> {
		if self.destroyed {
			tracing::warn!("keccak instance used after destroy");
			return Err(Error::Destroyed);
		}
		Ok(())
	}

	/// SHA3 and legacy Keccak with XOF are almost certainly a mistake; only SHAKE enables it.
	fn ensure_xof(&self) -> Result<()> {
		if !self.enable_xof {
			return Err(Error::XofNotSupported);
		}
		self.ensure_not_destroyed()
	}

	fn ensure_not_finished(&self) -> Result<()> {
		if self.finished {
			tracing::warn!("keccak instance used after finalization");
			return Err(Error::AlreadyFinished);
		}
		Ok(())
	}
}

impl StreamingHash for Keccak {
	fn block_len(&self) -> usize {
		self.rate
	}

	fn output_len(&self) -> usize {
		self.output_len
	}

	fn update(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self> {
		self.ensure_not_destroyed()?;
		self.ensure_not_finished()?;
		self.absorb(data.as_ref());
		Ok(self)
	}

	fn digest_into(&mut self, out: &mut [u8]) -> Result<()> {
		self.ensure_not_destroyed()?;
		if out.len() < self.output_len {
			return Err(Error::OutputBufferTooSmall {
				required: self.output_len,
				actual: out.len(),
			});
		}
		self.ensure_not_finished()?;
		self.squeeze(&mut out[..self.output_len]);
		self.destroy();
		Ok(())
	}

	fn digest(&mut self) -> Result<Vec<u8>> {
		let mut out = vec![0u8; self.output_len];
		self.digest_into(&mut out)?;
		Ok(out)
	}

	fn destroy(&mut self) {
		if !self.destroyed {
			tracing::trace!(rate = self.rate, "destroying keccak instance");
		}
		self.destroyed = true;
		self.state.zeroize();
	}
}

impl HashXof for Keccak {
	fn xof_into(&mut self, out: &mut [u8]) -> Result<()> {
		self.ensure_xof()?;
		self.squeeze(out);
		Ok(())
	}

	fn xof(&mut self, len: usize) -> Result<Vec<u8>> {
		self.ensure_xof()?;
		let mut out = vec![0u8; len];
		self.squeeze(&mut out);
		Ok(out)
	}
}

impl Drop for Keccak {
	fn drop(&mut self) {
		self.state.zeroize();
	}
}

impl fmt::Debug for Keccak {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Keccak")
			.field("rate", &self.rate)
			.field("suffix", &self.suffix)
			.field("output_len", &self.output_len)
			.field("rounds", &self.rounds)
			.field("enable_xof", &self.enable_xof)
			.field("finished", &self.finished)
			.field("destroyed", &self.destroyed)
			.finish_non_exhaustive()
	}
}
