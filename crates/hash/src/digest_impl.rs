// Copyright 2025 Irreducible Inc.

//! Adapters implementing the RustCrypto [`digest`] traits.
//!
//! The adapters own a handle that is only finalized by consuming `finalize_*` methods, so the
//! lifecycle errors of the native API cannot occur through them.

use digest::{
	ExtendableOutput, FixedOutput, FixedOutputReset, HashMarker, OutputSizeUser, Reset, Update,
	XofReader,
	consts::{U28, U32, U48, U64, U72, U104, U128, U136, U144, U168},
	core_api::BlockSizeUser,
};

use crate::{
	blake2::{Blake2b, Blake2s},
	keccak::{
		KECCAK_224, KECCAK_256, KECCAK_384, KECCAK_512, Keccak, SHA3_224, SHA3_256, SHA3_384,
		SHA3_512, SHAKE128, SHAKE256,
	},
};

macro_rules! impl_fixed_digest {
	($(#[$attr:meta])* $name:ident, $inner:ty, $create:expr, $output:ty, $block:ty) => {
		$(#[$attr])*
		#[derive(Clone, Debug)]
		pub struct $name($inner);

		impl Default for $name {
			fn default() -> Self {
				Self($create)
			}
		}

		impl HashMarker for $name {}

		impl Update for $name {
			fn update(&mut self, data: &[u8]) {
				self.0.absorb(data);
			}
		}

		impl OutputSizeUser for $name {
			type OutputSize = $output;
		}

		impl BlockSizeUser for $name {
			type BlockSize = $block;
		}

		impl FixedOutput for $name {
			fn finalize_into(mut self, out: &mut digest::Output<Self>) {
				self.finalize_inner(out);
			}
		}

		impl FixedOutputReset for $name {
			fn finalize_into_reset(&mut self, out: &mut digest::Output<Self>) {
				self.finalize_inner(out);
				Reset::reset(self);
			}
		}

		impl Reset for $name {
			fn reset(&mut self) {
				*self = Self::default();
			}
		}
	};
}

macro_rules! impl_keccak_digest {
	($(#[$attr:meta])* $name:ident, $variant:expr, $output:ty, $block:ty) => {
		impl_fixed_digest!($(#[$attr])* $name, Keccak, $variant.create(), $output, $block);

		impl $name {
			fn finalize_inner(&mut self, out: &mut digest::Output<Self>) {
				self.0.squeeze(out);
			}
		}
	};
}

macro_rules! impl_blake2_digest {
	($(#[$attr:meta])* $name:ident, $inner:ty, $output:ty, $block:ty) => {
		impl_fixed_digest!(
			$(#[$attr])* $name,
			$inner,
			<$inner>::with_output_len(<$output as digest::typenum::Unsigned>::USIZE),
			$output,
			$block
		);

		impl $name {
			fn finalize_inner(&mut self, out: &mut digest::Output<Self>) {
				self.0.finalize_into(out);
			}
		}
	};
}

impl_keccak_digest!(
	/// SHA3-224 as a [`digest::Digest`].
	Sha3_224Digest, SHA3_224, U28, U144
);
impl_keccak_digest!(
	/// SHA3-256 as a [`digest::Digest`].
	Sha3_256Digest, SHA3_256, U32, U136
);
impl_keccak_digest!(
	/// SHA3-384 as a [`digest::Digest`].
	Sha3_384Digest, SHA3_384, U48, U104
);
impl_keccak_digest!(
	/// SHA3-512 as a [`digest::Digest`].
	Sha3_512Digest, SHA3_512, U64, U72
);
impl_keccak_digest!(
	/// Keccak-224 as a [`digest::Digest`].
	Keccak224Digest, KECCAK_224, U28, U144
);
impl_keccak_digest!(
	/// Keccak-256 as a [`digest::Digest`].
	Keccak256Digest, KECCAK_256, U32, U136
);
impl_keccak_digest!(
	/// Keccak-384 as a [`digest::Digest`].
	Keccak384Digest, KECCAK_384, U48, U104
);
impl_keccak_digest!(
	/// Keccak-512 as a [`digest::Digest`].
	Keccak512Digest, KECCAK_512, U64, U72
);
impl_blake2_digest!(
	/// Unkeyed BLAKE2s-256 as a [`digest::Digest`].
	Blake2s256Digest, Blake2s, U32, U64
);
impl_blake2_digest!(
	/// Unkeyed BLAKE2b-512 as a [`digest::Digest`].
	Blake2b512Digest, Blake2b, U64, U128
);

/// Reads the output stream of a finalized SHAKE sponge.
#[derive(Clone, Debug)]
pub struct ShakeReader(Keccak);

impl XofReader for ShakeReader {
	fn read(&mut self, buffer: &mut [u8]) {
		self.0.squeeze(buffer);
	}
}

macro_rules! impl_shake_digest {
	($(#[$attr:meta])* $name:ident, $variant:expr, $block:ty) => {
		$(#[$attr])*
		#[derive(Clone, Debug)]
		pub struct $name(Keccak);

		impl Default for $name {
			fn default() -> Self {
				Self($variant.with_output_len($variant.default_len()))
			}
		}

		impl HashMarker for $name {}

		impl Update for $name {
			fn update(&mut self, data: &[u8]) {
				self.0.absorb(data);
			}
		}

		impl BlockSizeUser for $name {
			type BlockSize = $block;
		}

		impl ExtendableOutput for $name {
			type Reader = ShakeReader;

			fn finalize_xof(self) -> Self::Reader {
				ShakeReader(self.0)
			}
		}

		impl Reset for $name {
			fn reset(&mut self) {
				*self = Self::default();
			}
		}
	};
}

impl_shake_digest!(
	/// SHAKE128 as a [`digest::ExtendableOutput`].
	Shake128Digest, SHAKE128, U168
);
impl_shake_digest!(
	/// SHAKE256 as a [`digest::ExtendableOutput`].
	Shake256Digest, SHAKE256, U136
);
