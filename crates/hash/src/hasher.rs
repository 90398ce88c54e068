// Copyright 2025 Irreducible Inc.

//! The streaming contract shared by every hash in this crate.

use crate::error::Result;

/// An incremental hash computation.
///
/// Input may be fed in any number of [`update`](Self::update) calls of arbitrary size; the result
/// is the hash of the concatenated input. [`digest`](Self::digest) and
/// [`digest_into`](Self::digest_into) are terminal: afterwards every operation fails with a
/// lifecycle error. `Clone` produces a fully independent copy of the running computation.
pub trait StreamingHash: Clone {
	/// Number of bytes processed per compression or permutation call.
	fn block_len(&self) -> usize;

	/// Length of the digest produced by [`digest`](Self::digest), in bytes.
	fn output_len(&self) -> usize;

	/// Absorbs `data`, returning `self` for chaining.
	fn update(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self>;

	/// Finalizes the computation and writes the digest into `out[..output_len]`.
	///
	/// `out` must be at least [`output_len`](Self::output_len) bytes long.
	fn digest_into(&mut self, out: &mut [u8]) -> Result<()>;

	/// Finalizes the computation, returns the digest and destroys the instance.
	fn digest(&mut self) -> Result<Vec<u8>>;

	/// Wipes all internal state. Every later operation fails.
	fn destroy(&mut self);
}

/// A [`StreamingHash`] that can produce output of any length.
pub trait HashXof: StreamingHash {
	/// Fills `out` with the next `out.len()` bytes of output.
	///
	/// May be called repeatedly; consecutive calls continue the same output stream.
	fn xof_into(&mut self, out: &mut [u8]) -> Result<()>;

	/// Returns the next `len` bytes of output.
	fn xof(&mut self, len: usize) -> Result<Vec<u8>> {
		let mut out = vec![0u8; len];
		self.xof_into(&mut out)?;
		Ok(out)
	}
}

/// Hashes `data` with a freshly constructed `hasher` in one call.
#[tracing::instrument(level = "trace", skip_all)]
pub fn hash_oneshot<H: StreamingHash>(mut hasher: H, data: impl AsRef<[u8]>) -> Result<Vec<u8>> {
	hasher.update(data)?;
	hasher.digest()
}
