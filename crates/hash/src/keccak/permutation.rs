// Copyright 2025 Irreducible Inc.

//! Keccak-f\[1600\] permutation over 32-bit half-words.
//!
//! Each 64-bit lane `i` is held as two half-words: index `2 * i` is the low half and
//! `2 * i + 1` the high half. This matches the little-endian byte layout of the state, so byte `j`
//! of the state lives in half-word `j / 4`.

use zeroize::Zeroize;

use super::constants::{IOTA_HI, IOTA_LO, LANES, PI, ROTL, ROUNDS, STATE_WORDS};

/// Rotates the 64-bit value `hi:lo` left by `s` bits, returning the new `(lo, hi)` pair.
#[inline(always)]
pub fn rotl(lo: u32, hi: u32, s: u32) -> (u32, u32) {
	match s % 64 {
		0 => (lo, hi),
		32 => (hi, lo),
		s if s < 32 => (lo << s | hi >> (32 - s), hi << s | lo >> (32 - s)),
		s => {
			let s = s - 32;
			(hi << s | lo >> (32 - s), lo << s | hi >> (32 - s))
		}
	}
}

/// Applies the last `rounds` rounds of Keccak-f\[1600\] to `state` in place.
///
/// Rounds are numbered `0..24` and the permutation starts at round `24 - rounds`, so reduced-round
/// variants skip leading rounds. Round counts below 24 are not security reviewed.
///
/// ## Preconditions
///
/// * `rounds <= 24`
pub fn keccak_p(state: &mut [u32; STATE_WORDS], rounds: usize) {
	assert!(rounds <= ROUNDS, "keccak-p supports at most {ROUNDS} rounds, got {rounds}");

	let mut b = [0u32; 10];
	for round in ROUNDS - rounds..ROUNDS {
		theta(state, &mut b);
		rho_pi(state);
		chi(state, &mut b);
		// ι
		state[0] ^= IOTA_LO[round];
		state[1] ^= IOTA_HI[round];
	}
	b.zeroize();
}

/// The full 24-round Keccak-f\[1600\] permutation over 64-bit lanes.
pub fn keccak_f1600(lanes: &mut [u64; LANES]) {
	let mut state = [0u32; STATE_WORDS];
	for (i, &lane) in lanes.iter().enumerate() {
		state[2 * i] = lane as u32;
		state[2 * i + 1] = (lane >> 32) as u32;
	}
	keccak_p(&mut state, ROUNDS);
	for (i, lane) in lanes.iter_mut().enumerate() {
		*lane = (state[2 * i + 1] as u64) << 32 | state[2 * i] as u64;
	}
	state.zeroize();
}

#[inline(always)]
fn theta(s: &mut [u32; STATE_WORDS], b: &mut [u32; 10]) {
	for x in 0..10 {
		b[x] = s[x] ^ s[x + 10] ^ s[x + 20] ^ s[x + 30] ^ s[x + 40];
	}
	// D[x] = C[x-1] ^ rotl1(C[x+1])
	for x in (0..10).step_by(2) {
		let next = (x + 2) % 10;
		let prev = (x + 8) % 10;
		let (lo, hi) = rotl(b[next], b[next + 1], 1);
		let d_lo = lo ^ b[prev];
		let d_hi = hi ^ b[prev + 1];
		for y in (0..50).step_by(10) {
			s[x + y] ^= d_lo;
			s[x + y + 1] ^= d_hi;
		}
	}
}

#[inline(always)]
fn rho_pi(s: &mut [u32; STATE_WORDS]) {
	let mut cur_lo = s[2];
	let mut cur_hi = s[3];
	for t in 0..ROUNDS {
		let (lo, hi) = rotl(cur_lo, cur_hi, ROTL[t]);
		let dst = 2 * PI[t];
		cur_lo = s[dst];
		cur_hi = s[dst + 1];
		s[dst] = lo;
		s[dst + 1] = hi;
	}
}

#[inline(always)]
fn chi(s: &mut [u32; STATE_WORDS], b: &mut [u32; 10]) {
	for y in (0..50).step_by(10) {
		b.copy_from_slice(&s[y..y + 10]);
		for x in 0..10 {
			s[y + x] ^= !b[(x + 2) % 10] & b[(x + 4) % 10];
		}
	}
}
