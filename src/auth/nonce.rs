//! Nonce generation for signed requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Generate a nonce for request signing.
///
/// Derived from the wall clock at microsecond resolution and truncated to
/// milliseconds. The server rejects nonces that do not increase, so values
/// are reserved through a process-wide counter: a second call within the
/// same millisecond (or after a backwards clock step) still yields a larger
/// nonce than the one before it.
pub fn generate_nonce() -> u64 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros() as u64;
    let candidate = micros / 1_000;

    let mut previous = LAST_NONCE.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(previous + 1);
        match LAST_NONCE.compare_exchange_weak(
            previous,
            next,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(actual) => previous = actual,
        }
    }
}
