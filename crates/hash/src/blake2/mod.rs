// Copyright 2025 Irreducible Inc.

//! BLAKE2 streaming driver.
//!
//! The driver owns block buffering, the length counter and finalization; the variants
//! ([`Blake2sCore`], [`Blake2bCore`]) only supply the compression function and access to their
//! state words through [`Blake2Core`].
//!
//! Unlike Merkle-Damgård hashes, BLAKE2 marks the final compression with a flag, so a full buffer
//! cannot be compressed until it is known that more input follows. The driver therefore keeps a
//! full block buffered at the end of every `update` and only compresses it when the next byte
//! arrives or at finalization.

pub mod blake2b;
pub mod blake2s;
pub mod constants;

use std::fmt;

pub use blake2b::{Blake2b, Blake2bCore, blake2b, blake2b_512};
pub use blake2s::{Blake2s, Blake2sCore, blake2s, blake2s_256};
use bytemuck::Zeroable;
use zeroize::Zeroize;

use crate::{
	error::{Error, Result},
	hasher::StreamingHash,
};

/// A state word of a BLAKE2 variant.
pub trait StateWord: Copy + Zeroize {
	/// Size of the word in bytes.
	const BYTES: usize;

	/// Writes the leading `out.len()` bytes of the little-endian encoding.
	fn write_le(self, out: &mut [u8]);
}

impl StateWord for u32 {
	const BYTES: usize = 4;

	fn write_le(self, out: &mut [u8]) {
		out.copy_from_slice(&self.to_le_bytes()[..out.len()]);
	}
}

impl StateWord for u64 {
	const BYTES: usize = 8;

	fn write_le(self, out: &mut [u8]) {
		out.copy_from_slice(&self.to_le_bytes()[..out.len()]);
	}
}

/// The variant-specific part of BLAKE2: the compression function and its chaining state.
pub trait Blake2Core: Zeroize + Sized {
	type Word: StateWord;
	/// A block of message words. Word `i` holds bytes `4i..4i + 4` in native byte order, so the
	/// core must convert them with `u32::from_le`.
	type Block: bytemuck::Pod + AsRef<[u32]> + AsMut<[u32]>;

	const BLOCK_LEN: usize;
	/// Maximum key length, which is also the maximum output length.
	const KEY_LEN: usize;
	const SALT_LEN: usize;
	const PERS_LEN: usize;

	/// Initial chaining state for the given parameter block.
	///
	/// ## Preconditions
	///
	/// * `salt` and `personalization`, when present, are exactly `SALT_LEN` and `PERS_LEN` bytes
	fn new(
		output_len: usize,
		key_len: usize,
		salt: Option<&[u8]>,
		personalization: Option<&[u8]>,
	) -> Self;

	/// Compresses one block.
	///
	/// ## Arguments
	///
	/// * `msg` - exactly `BLOCK_LEN / 4` message words
	/// * `is_last` - whether this is the final block
	/// * `length` - total number of bytes absorbed, including this block
	fn compress(&mut self, msg: &[u32], is_last: bool, length: u128);

	fn get(&self) -> [Self::Word; 8];

	fn set(&mut self, words: &[Self::Word; 8]);
}

/// Construction options for BLAKE2.
#[derive(Clone, Copy, Default)]
pub struct Blake2Opts<'a> {
	/// Output length in bytes. Defaults to the variant maximum.
	pub dk_len: Option<usize>,
	/// Secret key for keyed hashing, `1..=KEY_LEN` bytes.
	pub key: Option<&'a [u8]>,
	/// Salt, exactly `SALT_LEN` bytes.
	pub salt: Option<&'a [u8]>,
	/// Personalization string, exactly `PERS_LEN` bytes.
	pub personalization: Option<&'a [u8]>,
}

impl<'a> Blake2Opts<'a> {
	pub fn with_dk_len(mut self, dk_len: usize) -> Self {
		self.dk_len = Some(dk_len);
		self
	}

	pub fn with_key(mut self, key: &'a [u8]) -> Self {
		self.key = Some(key);
		self
	}

	pub fn with_salt(mut self, salt: &'a [u8]) -> Self {
		self.salt = Some(salt);
		self
	}

	pub fn with_personalization(mut self, personalization: &'a [u8]) -> Self {
		self.personalization = Some(personalization);
		self
	}

	/// Checks the options against the bounds of core `C`, returning the output length.
	fn validate<C: Blake2Core>(&self) -> Result<usize> {
		let output_len = self.dk_len.unwrap_or(C::KEY_LEN);
		if output_len == 0 || output_len > C::KEY_LEN {
			return Err(Error::OutputLenOutOfRange {
				requested: output_len,
				max: C::KEY_LEN,
			});
		}
		if let Some(key) = self.key.filter(|key| key.is_empty() || key.len() > C::KEY_LEN) {
			return Err(Error::InvalidKeyLen {
				len: key.len(),
				max: C::KEY_LEN,
			});
		}
		if let Some(salt) = self.salt.filter(|salt| salt.len() != C::SALT_LEN) {
			return Err(Error::InvalidSaltLen {
				len: salt.len(),
				expected: C::SALT_LEN,
			});
		}
		if let Some(personalization) = self
			.personalization
			.filter(|personalization| personalization.len() != C::PERS_LEN)
		{
			return Err(Error::InvalidPersonalizationLen {
				len: personalization.len(),
				expected: C::PERS_LEN,
			});
		}
		Ok(output_len)
	}
}

impl fmt::Debug for Blake2Opts<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2Opts")
			.field("dk_len", &self.dk_len)
			.field("key", &self.key.map(|key| format!("<{} bytes>", key.len())))
			.field("salt", &self.salt)
			.field("personalization", &self.personalization)
			.finish()
	}
}

/// An incremental BLAKE2 computation over core `C`.
pub struct Blake2<C: Blake2Core> {
	core: C,
	buffer: C::Block,
	length: u128,
	pos: usize,
	output_len: usize,
	finished: bool,
	destroyed: bool,
}

impl<C: Blake2Core> Blake2<C> {
	/// Creates a hasher, rejecting out-of-range options before anything is absorbed.
	pub fn new(opts: &Blake2Opts) -> Result<Self> {
		let output_len = opts.validate::<C>().inspect_err(|err| {
			tracing::debug!(%err, "rejected BLAKE2 options");
		})?;

		let key_len = opts.key.map_or(0, <[u8]>::len);
		let mut hasher = Self::from_core(
			C::new(output_len, key_len, opts.salt, opts.personalization),
			output_len,
		);
		if let Some(key) = opts.key {
			// The key is absorbed as a full zero-padded block. It stays buffered, so it is the
			// last block if no message follows.
			bytemuck::bytes_of_mut(&mut hasher.buffer)[..key_len].copy_from_slice(key);
			hasher.pos = C::BLOCK_LEN;
			hasher.length = C::BLOCK_LEN as u128;
		}
		Ok(hasher)
	}

	/// Creates an unkeyed hasher with default parameters and the given output length.
	pub(crate) fn with_output_len(output_len: usize) -> Self {
		debug_assert!(output_len > 0 && output_len <= C::KEY_LEN);
		Self::from_core(C::new(output_len, 0, None, None), output_len)
	}

	fn from_core(core: C, output_len: usize) -> Self {
		Self {
			core,
			buffer: C::Block::zeroed(),
			length: 0,
			pos: 0,
			output_len,
			finished: false,
			destroyed: false,
		}
	}

	pub fn is_finished(&self) -> bool {
		self.finished
	}

	pub fn is_destroyed(&self) -> bool {
		self.destroyed
	}

	/// Total number of bytes absorbed so far, including a padded key block.
	pub fn length(&self) -> u128 {
		self.length
	}

	pub(crate) fn absorb(&mut self, data: &[u8]) {
		let block_words = C::BLOCK_LEN / 4;
		let len = data.len();
		let mut pos = 0;
		while pos < len {
			// A full buffer is only compressed once more input is known to exist
			if self.pos == C::BLOCK_LEN {
				self.core.compress(self.buffer.as_ref(), false, self.length);
				self.pos = 0;
			}

			let take = usize::min(C::BLOCK_LEN - self.pos, len - pos);
			// Full blocks that are not the end of the input can be compressed straight from the
			// caller's memory when it is word aligned.
			if take == C::BLOCK_LEN && pos + take < len {
				let n_blocks = (len - pos - 1) / C::BLOCK_LEN;
				let span = &data[pos..pos + n_blocks * C::BLOCK_LEN];
				if let Ok(words) = bytemuck::try_cast_slice::<u8, u32>(span) {
					for block in words.chunks_exact(block_words) {
						self.length += C::BLOCK_LEN as u128;
						self.core.compress(block, false, self.length);
					}
					pos += span.len();
					continue;
				}
			}

			bytemuck::bytes_of_mut(&mut self.buffer)[self.pos..self.pos + take]
				.copy_from_slice(&data[pos..pos + take]);
			self.pos += take;
			self.length += take as u128;
			pos += take;
		}
	}

	/// Compresses the final block and writes `out.len()` bytes of the chaining state.
	pub(crate) fn finalize_into(&mut self, out: &mut [u8]) {
		debug_assert!(out.len() <= C::KEY_LEN);
		self.finished = true;

		bytemuck::bytes_of_mut(&mut self.buffer)[self.pos..].fill(0);
		self.core.compress(self.buffer.as_ref(), true, self.length);

		for (chunk, word) in out.chunks_mut(<C::Word as StateWord>::BYTES).zip(self.core.get()) {
			word.write_le(chunk);
		}
	}

	fn ensure_not_destroyed(&self) -> Result<()> {
		if self.destroyed {
			tracing::warn!("BLAKE2 instance used after destroy");
			return Err(Error::Destroyed);
		}
		Ok(())
	}

	fn ensure_not_finished(&self) -> Result<()> {
		if self.finished {
			tracing::warn!("BLAKE2 instance used after finalization");
			return Err(Error::AlreadyFinished);
		}
		Ok(())
	}

	fn wipe(&mut self) {
		bytemuck::bytes_of_mut(&mut self.buffer).zeroize();
		self.core.zeroize();
	}
}

impl<C: Blake2Core> StreamingHash for Blake2<C> {
	fn block_len(&self) -> usize {
		C::BLOCK_LEN
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
		self.finalize_into(&mut out[..self.output_len]);
		Ok(())
	}

	fn digest(&mut self) -> Result<Vec<u8>> {
		let mut out = vec![0u8; self.output_len];
		self.digest_into(&mut out)?;
		self.destroy();
		Ok(out)
	}

	fn destroy(&mut self) {
		if !self.destroyed {
			tracing::trace!(block_len = C::BLOCK_LEN, "destroying BLAKE2 instance");
		}
		self.destroyed = true;
		self.wipe();
	}
}

impl<C: Blake2Core> Clone for Blake2<C> {
	fn clone(&self) -> Self {
		let mut to = Self::from_core(C::new(self.output_len, 0, None, None), self.output_len);
		to.clone_from(self);
		to
	}

	fn clone_from(&mut self, source: &Self) {
		self.core.set(&source.core.get());
		self.buffer = source.buffer;
		self.length = source.length;
		self.pos = source.pos;
		self.output_len = source.output_len;
		self.finished = source.finished;
		self.destroyed = source.destroyed;
	}
}

impl<C: Blake2Core> Drop for Blake2<C> {
	fn drop(&mut self) {
		self.wipe();
	}
}

impl<C: Blake2Core> fmt::Debug for Blake2<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2")
			.field("block_len", &C::BLOCK_LEN)
			.field("output_len", &self.output_len)
			.field("length", &self.length)
			.field("finished", &self.finished)
			.field("destroyed", &self.destroyed)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn test_rejects_oversized_key_before_absorbing() {
		let key = [7u8; 33];
		let err = Blake2s::new(&Blake2Opts::default().with_key(&key)).unwrap_err();
		assert_eq!(err, Error::InvalidKeyLen { len: 33, max: 32 });
		assert_eq!(err.kind(), ErrorKind::Configuration);

		let err = Blake2s::new(&Blake2Opts::default().with_key(&[])).unwrap_err();
		assert_eq!(err, Error::InvalidKeyLen { len: 0, max: 32 });
	}

	#[test]
	fn test_rejects_wrong_salt_and_personalization() {
		let err = Blake2s::new(&Blake2Opts::default().with_salt(&[0; 7])).unwrap_err();
		assert_eq!(err, Error::InvalidSaltLen { len: 7, expected: 8 });

		let err = Blake2b::new(&Blake2Opts::default().with_salt(&[0; 8])).unwrap_err();
		assert_eq!(err, Error::InvalidSaltLen { len: 8, expected: 16 });

		let err = Blake2b::new(&Blake2Opts::default().with_personalization(&[0; 17])).unwrap_err();
		assert_eq!(
			err,
			Error::InvalidPersonalizationLen {
				len: 17,
				expected: 16
			}
		);
	}

	#[test]
	fn test_rejects_output_length() {
		let err = Blake2s::new(&Blake2Opts::default().with_dk_len(33)).unwrap_err();
		assert_eq!(err, Error::OutputLenOutOfRange { requested: 33, max: 32 });
		assert!(Blake2b::new(&Blake2Opts::default().with_dk_len(0)).is_err());
		assert!(Blake2b::new(&Blake2Opts::default().with_dk_len(64)).is_ok());
	}

	#[test]
	fn test_buffered_full_block_is_not_last() {
		// Exactly one block: compressed as the last block at finalization
		let block = [0x61u8; 64];
		let mut one = Blake2s::new(&Blake2Opts::default()).unwrap();
		one.update(block).unwrap();
		assert_eq!(one.pos, 64);
		assert_eq!(one.length(), 64);
		let single = one.digest().unwrap();

		// The same block followed by more input must be compressed as an interior block
		let mut two = Blake2s::new(&Blake2Opts::default()).unwrap();
		two.update(block).unwrap();
		two.update(b"x").unwrap();
		assert_eq!(two.pos, 1);
		assert_eq!(two.length(), 65);

		let mut expected = block.to_vec();
		expected.push(b'x');
		assert_eq!(two.digest().unwrap(), blake2s(&expected, &Blake2Opts::default()).unwrap());
		assert_eq!(single, blake2s(block, &Blake2Opts::default()).unwrap());
	}

	#[test]
	fn test_aligned_fast_path_matches_copy_path() {
		// A u32 backing store guarantees a word aligned start; offsetting by one byte forces
		// the copy path over the same bytes.
		let words: Vec<u32> = (0..200u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
		let bytes: &[u8] = bytemuck::cast_slice(&words[..]);
		let aligned = &bytes[..700];
		let unaligned_backing = [&[0u8][..], aligned].concat();
		let unaligned = &unaligned_backing[1..];
		assert_eq!(aligned, unaligned);

		for opts in [Blake2Opts::default(), Blake2Opts::default().with_key(b"key")] {
			let mut fast = Blake2b::new(&opts).unwrap();
			fast.update(aligned).unwrap();
			let mut slow = Blake2b::new(&opts).unwrap();
			slow.update(unaligned).unwrap();
			assert_eq!(fast.length(), slow.length());
			assert_eq!(fast.digest().unwrap(), slow.digest().unwrap());

			let mut fast = Blake2s::new(&opts).unwrap();
			fast.update(aligned).unwrap();
			let mut slow = Blake2s::new(&opts).unwrap();
			slow.update(unaligned).unwrap();
			assert_eq!(fast.digest().unwrap(), slow.digest().unwrap());
		}
	}

	#[test]
	fn test_block_multiple_input_keeps_last_block_buffered() {
		let words = [0x0102_0304u32; 64];
		let data: &[u8] = bytemuck::cast_slice(&words[..]);
		let mut hasher = Blake2s::new(&Blake2Opts::default()).unwrap();
		hasher.update(data).unwrap();
		assert_eq!(hasher.pos, 64);
		assert_eq!(hasher.length(), 256);
	}

	#[test]
	fn test_digest_into_keeps_instance_finished() {
		let mut hasher = Blake2s::new(&Blake2Opts::default()).unwrap();
		let mut short = [0u8; 31];
		assert_eq!(
			hasher.digest_into(&mut short).unwrap_err(),
			Error::OutputBufferTooSmall {
				required: 32,
				actual: 31
			}
		);

		let mut out = [0u8; 32];
		hasher.digest_into(&mut out).unwrap();
		assert_eq!(out, hex!("69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9"));
		assert!(hasher.is_finished());
		assert!(!hasher.is_destroyed());
		assert_eq!(hasher.update(b"x").unwrap_err(), Error::AlreadyFinished);
		assert_eq!(hasher.digest_into(&mut out).unwrap_err(), Error::AlreadyFinished);
	}

	#[test]
	fn test_digest_destroys() {
		let mut hasher = Blake2b::new(&Blake2Opts::default().with_key(b"secret")).unwrap();
		hasher.update(b"message").unwrap();
		hasher.digest().unwrap();
		assert!(hasher.is_destroyed());
		assert_eq!(hasher.core.get(), [0u64; 8]);
		assert_eq!(bytemuck::bytes_of(&hasher.buffer), &[0u8; 128][..]);
		assert_eq!(hasher.update(b"x").unwrap_err(), Error::Destroyed);
		assert_eq!(hasher.digest().unwrap_err(), Error::Destroyed);
	}

	#[test]
	fn test_clone_from_reuses_target() {
		let mut source = Blake2s::new(&Blake2Opts::default().with_dk_len(20)).unwrap();
		source.update(b"prefix").unwrap();

		let mut target = Blake2s::new(&Blake2Opts::default()).unwrap();
		target.update(b"unrelated").unwrap();
		target.clone_from(&source);

		assert_eq!(target.output_len(), 20);
		assert_eq!(target.digest().unwrap(), source.digest().unwrap());
	}

	#[test]
	fn test_debug_redacts_key() {
		let opts = Blake2Opts::default().with_key(b"hunter2");
		let rendered = format!("{opts:?}");
		assert!(rendered.contains("<7 bytes>"));
		assert!(!rendered.contains("104"));
	}
}
