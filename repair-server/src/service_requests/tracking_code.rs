//! Tracking code generation
//!
//! `SRV-<clock % 1_000_000>-<random 0..=9999>`. Uniqueness is not promised
//! here; the store's UNIQUE index catches collisions and the creation loop
//! asks for another code.

use rand::Rng;
use shared::models::{RANDOM_GROUP_MODULUS, TrackingCode};
use shared::util::now_millis;

/// How many codes creation tries before giving up
pub const MAX_TRACKING_CODE_ATTEMPTS: usize = 8;

/// Source of candidate tracking codes
pub trait TrackingCodeSource: Send + Sync {
    fn next_code(&self) -> TrackingCode;
}

/// Millisecond clock + uniform random group
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTrackingCodes;

impl TrackingCodeSource for ClockTrackingCodes {
    fn next_code(&self) -> TrackingCode {
        generate()
    }
}

/// One fresh candidate code
pub fn generate() -> TrackingCode {
    let clock = u64::try_from(now_millis()).unwrap_or_default();
    let random = rand::thread_rng().gen_range(0..RANDOM_GROUP_MODULUS);
    TrackingCode::from_parts(clock, random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..200 {
            let code = ClockTrackingCodes.next_code();
            assert_eq!(TrackingCode::parse(code.as_str()).unwrap(), code);
            assert!(code.as_str().starts_with("SRV-"));
            assert_eq!(code.as_str().len(), "SRV-000000-0000".len());
        }
    }

    #[test]
    fn test_clock_group_tracks_current_time() {
        let before = now_millis() % 1_000_000;
        let code = generate();
        let after = now_millis() % 1_000_000;
        let clock: i64 = code.as_str()[4..10].parse().unwrap();
        // allow wrap-around at the modulus boundary
        assert!((before..=after).contains(&clock) || after < before);
    }
}
