// Copyright 2025 Irreducible Inc.
//! Keccak-f\[1600\] constants.
//!
//! The ι round constants, ρ rotation offsets and π lane schedule are derived at compile time from
//! their defining recurrences rather than transcribed, and are immutable afterwards.

/// Number of rounds of the full Keccak-f\[1600\] permutation.
pub const ROUNDS: usize = 24;

/// Size of the permutation state in bytes.
pub const STATE_BYTES: usize = 200;

/// Size of the permutation state in 32-bit half-words.
pub const STATE_WORDS: usize = STATE_BYTES / 4;

/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;

struct Tables {
	pi: [usize; ROUNDS],
	rotl: [u32; ROUNDS],
	iota_lo: [u32; ROUNDS],
	iota_hi: [u32; ROUNDS],
}

const fn derive_tables() -> Tables {
	let mut tables = Tables {
		pi: [0; ROUNDS],
		rotl: [0; ROUNDS],
		iota_lo: [0; ROUNDS],
		iota_hi: [0; ROUNDS],
	};

	// 8-bit Galois LFSR over x^8 + x^6 + x^5 + x^4 + 1
	let mut lfsr: u32 = 1;
	let (mut x, mut y) = (1, 0);
	let mut round = 0;
	while round < ROUNDS {
		// π: (x, y) -> (y, 2x + 3y)
		let next_y = (2 * x + 3 * y) % 5;
		x = y;
		y = next_y;
		tables.pi[round] = x + 5 * y;

		// ρ: triangular numbers mod 64
		tables.rotl[round] = (((round + 1) * (round + 2) / 2) % 64) as u32;

		// ι: bit 2^j - 1 of the constant is taken from the LFSR output
		let mut rc: u64 = 0;
		let mut j = 0;
		while j < 7 {
			lfsr = ((lfsr << 1) ^ ((lfsr >> 7) * 0x71)) % 256;
			if lfsr & 2 != 0 {
				rc ^= 1 << ((1 << j) - 1);
			}
			j += 1;
		}
		tables.iota_lo[round] = rc as u32;
		tables.iota_hi[round] = (rc >> 32) as u32;

		round += 1;
	}
	tables
}

const TABLES: Tables = derive_tables();

/// π: destination lane for each step of the fused ρ/π pass, starting from lane 1.
pub const PI: [usize; ROUNDS] = TABLES.pi;

/// ρ: rotation amount applied at each step of the fused ρ/π pass.
pub const ROTL: [u32; ROUNDS] = TABLES.rotl;

/// ι round constants, low half-words.
pub const IOTA_LO: [u32; ROUNDS] = TABLES.iota_lo;

/// ι round constants, high half-words.
pub const IOTA_HI: [u32; ROUNDS] = TABLES.iota_hi;
