//! Flash cooldown math.
//!
//! The server stores an absolute `ready_at` timestamp instead of a
//! decrementing counter; every party derives "seconds remaining" locally
//! by subtracting its own notion of now. These helpers implement the
//! fixed cooldown table and that derivation.

/// Base Flash cooldown: 5 minutes
pub const FLASH_BASE_COOLDOWN: u32 = 300;

/// With the haste boots only: 4:28
pub const FLASH_COOLDOWN_WITH_BOOTS: u32 = 268;

/// With the insight rune only: 4:15
pub const FLASH_COOLDOWN_WITH_RUNE: u32 = 255;

/// With both boots and rune: 3:51
pub const FLASH_COOLDOWN_WITH_BOTH: u32 = 231;

/// Calculate the Flash cooldown in seconds for the given item state.
///
/// The two reductions stack multiplicatively in the game; the curve is
/// approximated by four discrete constants.
pub fn flash_cooldown(boots: bool, rune: bool) -> u32 {
    match (boots, rune) {
        (true, true) => FLASH_COOLDOWN_WITH_BOTH,
        (true, false) => FLASH_COOLDOWN_WITH_BOOTS,
        (false, true) => FLASH_COOLDOWN_WITH_RUNE,
        (false, false) => FLASH_BASE_COOLDOWN,
    }
}

/// Derive the seconds remaining until `ready_at_ms`, clamped to zero.
pub fn remaining_seconds(ready_at_ms: i64, now_ms: i64) -> u32 {
    let remaining_ms = (ready_at_ms - now_ms).max(0) as u64;
    remaining_ms.div_ceil(1000) as u32
}

/// Format a cooldown as `M:SS` (e.g. "4:15").
pub fn format_cooldown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    format!("{}:{:02}", minutes, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_cooldown_table() {
        // given/when/then: the four fixed values
        assert_eq!(flash_cooldown(false, false), 300);
        assert_eq!(flash_cooldown(true, false), 268);
        assert_eq!(flash_cooldown(false, true), 255);
        assert_eq!(flash_cooldown(true, true), 231);
    }

    #[test]
    fn test_flash_cooldown_is_monotonically_non_increasing() {
        // given: cooldowns ordered by number of active reductions
        let none = flash_cooldown(false, false);
        let boots = flash_cooldown(true, false);
        let rune = flash_cooldown(false, true);
        let both = flash_cooldown(true, true);

        // then: more reductions never increase the cooldown
        assert!(boots < none);
        assert!(rune < none);
        assert!(both < boots);
        assert!(both < rune);
    }

    #[test]
    fn test_flash_cooldown_values_are_pairwise_distinct() {
        // given:
        let mut values = vec![
            flash_cooldown(false, false),
            flash_cooldown(true, false),
            flash_cooldown(false, true),
            flash_cooldown(true, true),
        ];

        // when:
        values.sort_unstable();
        values.dedup();

        // then:
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_remaining_seconds_counts_down() {
        // given: ready in exactly 300 seconds
        let ready_at = 1_000_000 + 300_000;

        // when/then:
        assert_eq!(remaining_seconds(ready_at, 1_000_000), 300);
        assert_eq!(remaining_seconds(ready_at, 1_000_000 + 150_000), 150);
    }

    #[test]
    fn test_remaining_seconds_never_negative() {
        // given: ready_at already in the past
        let ready_at = 1_000_000;

        // when:
        let remaining = remaining_seconds(ready_at, 1_000_000 + 300_001);

        // then: clamped to zero, not negative
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_remaining_seconds_rounds_up_partial_seconds() {
        // given: 1.2 seconds remaining
        let ready_at = 10_000;

        // when:
        let remaining = remaining_seconds(ready_at, 8_800);

        // then: displayed as 2, not 1
        assert_eq!(remaining, 2);
    }

    #[test]
    fn test_format_cooldown() {
        assert_eq!(format_cooldown(300), "5:00");
        assert_eq!(format_cooldown(255), "4:15");
        assert_eq!(format_cooldown(61), "1:01");
        assert_eq!(format_cooldown(0), "0:00");
    }
}
