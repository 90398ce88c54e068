// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the hash crate.

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Invalid construction parameters.
	Configuration,
	/// Operation attempted in a state that does not allow it.
	Lifecycle,
	/// Caller-supplied output buffer too small.
	Buffer,
}

#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("output length must be in the range 1..={max}, got: {requested}")]
	OutputLenOutOfRange { requested: usize, max: usize },
	#[error("key must be 1..={max} bytes long, got: {len}")]
	InvalidKeyLen { len: usize, max: usize },
	#[error("salt must be exactly {expected} bytes long, got: {len}")]
	InvalidSaltLen { len: usize, expected: usize },
	#[error("personalization must be exactly {expected} bytes long, got: {len}")]
	InvalidPersonalizationLen { len: usize, expected: usize },
	#[error("rate must be in the range 1..200 bytes for keccak-f[1600], got: {rate}")]
	InvalidRate { rate: usize },
	#[error("round count must be in the range 1..=24, got: {rounds}")]
	InvalidRounds { rounds: usize },
	#[error("digest() was already called")]
	AlreadyFinished,
	#[error("instance is destroyed")]
	Destroyed,
	#[error("XOF is not possible for this instance")]
	XofNotSupported,
	#[error("output buffer must be at least {required} bytes, got: {actual}")]
	OutputBufferTooSmall { required: usize, actual: usize },
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::OutputLenOutOfRange { .. }
			| Self::InvalidKeyLen { .. }
			| Self::InvalidSaltLen { .. }
			| Self::InvalidPersonalizationLen { .. }
			| Self::InvalidRate { .. }
			| Self::InvalidRounds { .. } => ErrorKind::Configuration,
			Self::AlreadyFinished | Self::Destroyed | Self::XofNotSupported => ErrorKind::Lifecycle,
			Self::OutputBufferTooSmall { .. } => ErrorKind::Buffer,
		}
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_kinds() {
		assert_eq!(Error::InvalidSaltLen { len: 3, expected: 8 }.kind(), ErrorKind::Configuration);
		assert_eq!(Error::XofNotSupported.kind(), ErrorKind::Lifecycle);
		assert_eq!(
			Error::OutputBufferTooSmall {
				required: 32,
				actual: 16
			}
			.kind(),
			ErrorKind::Buffer
		);
	}

	#[test]
	fn test_error_messages() {
		let err = Error::InvalidKeyLen { len: 33, max: 32 };
		assert_eq!(err.to_string(), "key must be 1..=32 bytes long, got: 33");
	}
}
