//! Injected randomness
//!
//! Every operation that needs fresh random bytes takes an [`EntropySource`]
//! argument. There is no process-wide generator: production code passes
//! [`OsEntropy`], tests pass a closure returning fixed bytes.

use rand::rngs::OsRng;
use rand::RngCore;

/// A source of cryptographically secure random bytes.
///
/// Implementations must return exactly `size` bytes. Callers check the
/// length and fail rather than pad a short answer.
pub trait EntropySource {
    fn random_bytes(&mut self, size: usize) -> Vec<u8>;
}

/// The operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn random_bytes(&mut self, size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; size];
        OsRng.fill_bytes(&mut bytes);
        bytes
    }
}

impl<F> EntropySource for F
where
    F: FnMut(usize) -> Vec<u8>,
{
    fn random_bytes(&mut self, size: usize) -> Vec<u8> {
        self(size)
    }
}
