// Copyright 2025 Irreducible Inc.

//! Keccak-f\[1600\] and the sponge functions built on it: SHA3, legacy Keccak and SHAKE.

pub mod constants;
pub mod permutation;
pub mod sponge;
pub mod variants;

pub use permutation::{keccak_f1600, keccak_p};
pub use sponge::Keccak;
pub use variants::*;
