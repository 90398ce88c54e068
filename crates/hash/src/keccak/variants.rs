// Copyright 2025 Irreducible Inc.

//! SHA3, legacy Keccak and SHAKE parameterizations of the sponge.

use super::{constants::ROUNDS, sponge::Keccak};
use crate::{
	error::{Error, Result},
	hasher::StreamingHash,
};

/// Domain separation suffix of the SHA3 fixed-output functions.
pub const SHA3_SUFFIX: u8 = 0x06;
/// Domain separation suffix of the original Keccak submission, as used by Ethereum.
pub const KECCAK_SUFFIX: u8 = 0x01;
/// Domain separation suffix of the SHAKE extendable-output functions.
pub const SHAKE_SUFFIX: u8 = 0x1f;

/// A fixed-output sponge variant producing `OUT` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeccakVariant<const OUT: usize> {
	rate: usize,
	suffix: u8,
}

impl<const OUT: usize> KeccakVariant<OUT> {
	const fn new(rate: usize, suffix: u8) -> Self {
		Self { rate, suffix }
	}

	pub const fn rate(&self) -> usize {
		self.rate
	}

	pub const fn suffix(&self) -> u8 {
		self.suffix
	}

	/// Returns an incremental handle.
	pub fn create(&self) -> Keccak {
		Keccak::with_params(self.rate, self.suffix, OUT, false, ROUNDS)
	}

	/// Hashes `data` in one call.
	pub fn hash(&self, data: impl AsRef<[u8]>) -> [u8; OUT] {
		let mut hasher = self.create();
		hasher.absorb(data.as_ref());
		let mut out = [0u8; OUT];
		hasher.squeeze(&mut out);
		out
	}
}

pub const SHA3_224: KeccakVariant<28> = KeccakVariant::new(144, SHA3_SUFFIX);
pub const SHA3_256: KeccakVariant<32> = KeccakVariant::new(136, SHA3_SUFFIX);
pub const SHA3_384: KeccakVariant<48> = KeccakVariant::new(104, SHA3_SUFFIX);
pub const SHA3_512: KeccakVariant<64> = KeccakVariant::new(72, SHA3_SUFFIX);
pub const KECCAK_224: KeccakVariant<28> = KeccakVariant::new(144, KECCAK_SUFFIX);
pub const KECCAK_256: KeccakVariant<32> = KeccakVariant::new(136, KECCAK_SUFFIX);
pub const KECCAK_384: KeccakVariant<48> = KeccakVariant::new(104, KECCAK_SUFFIX);
pub const KECCAK_512: KeccakVariant<64> = KeccakVariant::new(72, KECCAK_SUFFIX);

/// Options accepted by the SHAKE constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShakeOpts {
	/// Output length of `digest` in bytes. Defaults to the nominal security length.
	pub dk_len: Option<usize>,
}

impl ShakeOpts {
	pub fn with_dk_len(dk_len: usize) -> Self {
		Self {
			dk_len: Some(dk_len),
		}
	}
}

/// An extendable-output sponge variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShakeVariant {
	rate: usize,
	default_len: usize,
}

impl ShakeVariant {
	pub const fn rate(&self) -> usize {
		self.rate
	}

	pub const fn default_len(&self) -> usize {
		self.default_len
	}

	/// Returns an incremental handle with XOF enabled.
	pub fn create(&self, opts: ShakeOpts) -> Result<Keccak> {
		let output_len = opts.dk_len.unwrap_or(self.default_len);
		if output_len == 0 {
			tracing::debug!("rejected zero SHAKE output length");
			return Err(Error::OutputLenOutOfRange {
				requested: 0,
				max: usize::MAX,
			});
		}
		Ok(self.with_output_len(output_len))
	}

	pub(crate) const fn with_output_len(&self, output_len: usize) -> Keccak {
		Keccak::with_params(self.rate, SHAKE_SUFFIX, output_len, true, ROUNDS)
	}

	/// Hashes `data` in one call, producing `dk_len` bytes.
	pub fn hash(&self, data: impl AsRef<[u8]>, opts: ShakeOpts) -> Result<Vec<u8>> {
		let mut hasher = self.create(opts)?;
		hasher.absorb(data.as_ref());
		let mut out = vec![0u8; hasher.output_len()];
		hasher.squeeze(&mut out);
		Ok(out)
	}
}

pub const SHAKE128: ShakeVariant = ShakeVariant {
	rate: 168,
	default_len: 16,
};
pub const SHAKE256: ShakeVariant = ShakeVariant {
	rate: 136,
	default_len: 32,
};

#[tracing::instrument(level = "trace", skip_all)]
pub fn sha3_224(data: impl AsRef<[u8]>) -> [u8; 28] {
	SHA3_224.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn sha3_256(data: impl AsRef<[u8]>) -> [u8; 32] {
	SHA3_256.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn sha3_384(data: impl AsRef<[u8]>) -> [u8; 48] {
	SHA3_384.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn sha3_512(data: impl AsRef<[u8]>) -> [u8; 64] {
	SHA3_512.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn keccak_224(data: impl AsRef<[u8]>) -> [u8; 28] {
	KECCAK_224.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn keccak_256(data: impl AsRef<[u8]>) -> [u8; 32] {
	KECCAK_256.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn keccak_384(data: impl AsRef<[u8]>) -> [u8; 48] {
	KECCAK_384.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn keccak_512(data: impl AsRef<[u8]>) -> [u8; 64] {
	KECCAK_512.hash(data)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn shake128(data: impl AsRef<[u8]>, opts: ShakeOpts) -> Result<Vec<u8>> {
	SHAKE128.hash(data, opts)
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn shake256(data: impl AsRef<[u8]>, opts: ShakeOpts) -> Result<Vec<u8>> {
	SHAKE256.hash(data, opts)
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;
	use sha3::Digest;

	use super::*;
	use crate::hasher::HashXof;

	#[test]
	fn test_known_answers() {
		assert_eq!(
			sha3_256("abc"),
			hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
		);
		assert_eq!(
			keccak_256("abc"),
			hex!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
		);
		assert_eq!(
			keccak_256(""),
			hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
		);
		assert_eq!(
			sha3_224(""),
			hex!("6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7")
		);
	}

	#[test]
	fn test_sha3_differs_from_keccak() {
		assert_ne!(sha3_256("abc"), keccak_256("abc"));
		assert_ne!(sha3_512("abc"), keccak_512("abc"));
	}

	#[test]
	fn test_matches_sha3_crate() {
		let data: Vec<u8> = (0u32..700).map(|i| (i * 31 % 251) as u8).collect();
		for len in [0, 1, 71, 72, 73, 135, 136, 137, 143, 144, 145, 300, 700] {
			let msg = &data[..len];
			assert_eq!(sha3_224(msg)[..], sha3::Sha3_224::digest(msg)[..]);
			assert_eq!(sha3_256(msg)[..], sha3::Sha3_256::digest(msg)[..]);
			assert_eq!(sha3_384(msg)[..], sha3::Sha3_384::digest(msg)[..]);
			assert_eq!(sha3_512(msg)[..], sha3::Sha3_512::digest(msg)[..]);
			assert_eq!(keccak_224(msg)[..], sha3::Keccak224::digest(msg)[..]);
			assert_eq!(keccak_256(msg)[..], sha3::Keccak256::digest(msg)[..]);
			assert_eq!(keccak_384(msg)[..], sha3::Keccak384::digest(msg)[..]);
			assert_eq!(keccak_512(msg)[..], sha3::Keccak512::digest(msg)[..]);
		}
	}

	#[test]
	fn test_shake_matches_sha3_crate() {
		use sha3::digest::{ExtendableOutput, Update};

		for len in [1, 16, 32, 167, 168, 169, 500] {
			let mut expected = vec![0u8; len];
			let mut reference = sha3::Shake128::default();
			Update::update(&mut reference, b"The quick brown fox");
			reference.finalize_xof_into(&mut expected);
			let actual = shake128("The quick brown fox", ShakeOpts::with_dk_len(len)).unwrap();
			assert_eq!(actual, expected, "shake128 len {len}");

			let mut expected = vec![0u8; len];
			let mut reference = sha3::Shake256::default();
			Update::update(&mut reference, b"The quick brown fox");
			reference.finalize_xof_into(&mut expected);
			let actual = shake256("The quick brown fox", ShakeOpts::with_dk_len(len)).unwrap();
			assert_eq!(actual, expected, "shake256 len {len}");
		}
	}

	#[test]
	fn test_shake_default_lengths() {
		assert_eq!(shake128("", ShakeOpts::default()).unwrap().len(), 16);
		assert_eq!(shake256("", ShakeOpts::default()).unwrap().len(), 32);
		assert_eq!(
			shake256("", ShakeOpts::default()).unwrap(),
			hex!("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f")
		);
	}

	#[test]
	fn test_shake_rejects_zero_length() {
		assert!(SHAKE128.create(ShakeOpts::with_dk_len(0)).is_err());
	}

	#[test]
	fn test_shake_digest_prefix_of_xof() {
		let mut long = SHAKE256.create(ShakeOpts::default()).unwrap();
		long.update(b"prefix").unwrap();
		let stream = long.xof(64).unwrap();

		let mut short = SHAKE256.create(ShakeOpts::with_dk_len(20)).unwrap();
		short.update(b"prefix").unwrap();
		assert_eq!(short.digest().unwrap(), stream[..20]);
	}

	#[test]
	fn test_fixed_variants_are_not_xof() {
		let mut hasher = SHA3_512.create();
		assert!(!hasher.is_xof());
		assert_eq!(hasher.block_len(), 72);
		assert_eq!(hasher.output_len(), 64);
		assert!(hasher.xof(1).is_err());
	}
}
