// Copyright 2025 Irreducible Inc.

//! Streaming implementations of the Keccak and BLAKE2 hash families.
//!
//! The crate provides:
//!
//! * the Keccak-f\[1600\] permutation and the sponge functions built on it: SHA3-224/256/384/512,
//!   the legacy Keccak-224/256/384/512 used by Ethereum, and the SHAKE128/256 extendable-output
//!   functions;
//! * BLAKE2s and BLAKE2b with keying, salting, personalization and variable output length.
//!
//! Every hash is available as a one-shot function and as an incremental handle implementing
//! [`StreamingHash`]. Handles are consumed by [`StreamingHash::digest`], after which every
//! operation fails with a lifecycle [`Error`]. Adapters for the RustCrypto [`digest`](::digest)
//! traits live in [`digest_impl`].
//!
//! ```
//! use strata_hash::{SHA3_256, StreamingHash, sha3_256};
//!
//! let mut hasher = SHA3_256.create();
//! hasher.update(b"hello ")?.update(b"world")?;
//! assert_eq!(hasher.digest()?, sha3_256(b"hello world"));
//! # Ok::<(), strata_hash::Error>(())
//! ```

pub mod blake2;
pub mod digest_impl;
mod error;
pub mod hasher;
pub mod keccak;

pub use blake2::{
	Blake2, Blake2Opts, Blake2b, Blake2s, blake2b, blake2b_512, blake2s, blake2s_256,
};
pub use error::*;
pub use hasher::*;
pub use keccak::{
	KECCAK_224, KECCAK_256, KECCAK_384, KECCAK_512, Keccak, KeccakVariant, SHA3_224, SHA3_256,
	SHA3_384, SHA3_512, SHAKE128, SHAKE256, ShakeOpts, ShakeVariant, keccak_224, keccak_256,
	keccak_384, keccak_512, keccak_f1600, keccak_p, sha3_224, sha3_256, sha3_384, sha3_512,
	shake128, shake256,
};
