// Copyright 2026 The wordmill authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The SM-2 scheduling algorithm: pure functions from a rating to the next
//! scheduling state. Persistence and clocks live elsewhere.

use crate::types::quality::Quality;

/// Ease factor assigned to freshly learned items.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Hard floor for the ease factor. Keeps intervals from shrinking without
/// bound for a difficult item.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval after the first successful review, and after any failure.
const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second consecutive successful review.
const SECOND_INTERVAL_DAYS: u32 = 6;

/// Ceiling on the interval: one century. The ease factor has no upper
/// bound, so a long success streak would otherwise grow the interval past
/// what a timestamp can represent.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// The scheduling fields of a single item, as the algorithm sees them.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sm2State {
    pub interval_days: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
}

/// State for a freshly learned item: due again one day out.
pub fn initial_state() -> Sm2State {
    Sm2State {
        interval_days: FIRST_INTERVAL_DAYS,
        ease_factor: INITIAL_EASE_FACTOR,
        repetitions: 0,
    }
}

/// Applies one review. The ease factor moves first; a failed recall then
/// restarts the schedule from tomorrow, while a successful one grows the
/// interval by the repetition count and the updated ease factor, up to
/// [`MAX_INTERVAL_DAYS`].
pub fn next_state(state: Sm2State, quality: Quality) -> Sm2State {
    let ease_factor = next_ease_factor(state.ease_factor, quality);
    if !quality.is_passing() {
        return Sm2State {
            interval_days: FIRST_INTERVAL_DAYS,
            ease_factor,
            repetitions: 0,
        };
    }
    let repetitions = state.repetitions + 1;
    let interval_days = match repetitions {
        1 => FIRST_INTERVAL_DAYS,
        2 => SECOND_INTERVAL_DAYS,
        _ => grown_interval(state.interval_days, ease_factor),
    };
    Sm2State {
        interval_days,
        ease_factor,
        repetitions,
    }
}

fn grown_interval(interval_days: u32, ease_factor: f64) -> u32 {
    // The float-to-int cast saturates, so the product cannot wrap before
    // the cap is applied.
    let grown = (f64::from(interval_days) * ease_factor).round() as u32;
    grown.min(MAX_INTERVAL_DAYS)
}

fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let spread = 5.0 - f64::from(quality.value());
    let updated = ease_factor + (0.1 - spread * (0.08 + spread * 0.02));
    updated.max(MIN_EASE_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn quality(raw: i64) -> Quality {
        Quality::try_from(raw).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_initial_state() {
        let state = initial_state();
        assert_eq!(state.interval_days, 1);
        assert_close(state.ease_factor, 2.5);
        assert_eq!(state.repetitions, 0);
    }

    #[test]
    fn test_first_success() {
        let state = next_state(initial_state(), Quality::EASY);
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
        assert_close(state.ease_factor, 2.6);
    }

    #[test]
    fn test_second_success() {
        let state = next_state(initial_state(), Quality::EASY);
        let state = next_state(state, Quality::GOOD);
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval_days, 6);
        // A rating of 4 leaves the ease factor unchanged.
        assert_close(state.ease_factor, 2.6);
    }

    #[test]
    fn test_third_success() {
        let state = next_state(initial_state(), Quality::EASY);
        let state = next_state(state, Quality::GOOD);
        let state = next_state(state, Quality::EASY);
        assert_eq!(state.repetitions, 3);
        assert_close(state.ease_factor, 2.7);
        // round(6 * 2.7) = round(16.2).
        assert_eq!(state.interval_days, 16);
    }

    #[test]
    fn test_failure_resets_schedule() {
        let state = Sm2State {
            interval_days: 42,
            ease_factor: 2.7,
            repetitions: 7,
        };
        let state = next_state(state, Quality::FORGOT);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval_days, 1);
        assert_close(state.ease_factor, 2.7 - 0.54);
    }

    #[test]
    fn test_all_failing_qualities_reset() {
        for raw in 0..3 {
            let state = Sm2State {
                interval_days: 10,
                ease_factor: 2.0,
                repetitions: 4,
            };
            let state = next_state(state, quality(raw));
            assert_eq!(state.repetitions, 0, "quality {raw}");
            assert_eq!(state.interval_days, 1, "quality {raw}");
        }
    }

    #[test]
    fn test_ease_factor_deltas() {
        // Per the SM-2 formula: 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02).
        let expected = [
            (5, 0.1),
            (4, 0.0),
            (3, -0.14),
            (2, -0.32),
            (1, -0.54),
            (0, -0.8),
        ];
        for (raw, delta) in expected {
            let state = Sm2State {
                interval_days: 1,
                ease_factor: 2.5,
                repetitions: 0,
            };
            let state = next_state(state, quality(raw));
            assert_close(state.ease_factor, 2.5 + delta);
        }
    }

    #[test]
    fn test_ease_factor_floor() {
        let mut state = initial_state();
        for _ in 0..10 {
            state = next_state(state, quality(0));
        }
        assert_close(state.ease_factor, MIN_EASE_FACTOR);
        // At the floor, further failures stay at the floor exactly.
        let state = next_state(state, quality(0));
        assert_close(state.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_interval_uses_updated_ease_factor() {
        let state = Sm2State {
            interval_days: 10,
            ease_factor: 2.5,
            repetitions: 2,
        };
        let state = next_state(state, Quality::EASY);
        // round(10 * 2.6) = 26, not round(10 * 2.5) = 25.
        assert_eq!(state.interval_days, 26);
    }

    #[test]
    fn test_interval_rounds_half_up() {
        let state = Sm2State {
            interval_days: 5,
            ease_factor: 1.3,
            repetitions: 2,
        };
        // A rating of 4 keeps the ease factor at 1.3: round(5 * 1.3) = round(6.5).
        let state = next_state(state, Quality::GOOD);
        assert_eq!(state.interval_days, 7);
    }

    #[test]
    fn test_interval_growth_is_capped() {
        let mut state = initial_state();
        for _ in 0..60 {
            state = next_state(state, Quality::EASY);
            assert!(state.interval_days <= MAX_INTERVAL_DAYS);
        }
        assert_eq!(state.interval_days, MAX_INTERVAL_DAYS);
        // A failure still resets a capped item to one day.
        let state = next_state(state, Quality::FORGOT);
        assert_eq!(state.interval_days, 1);
    }

    #[test]
    fn test_floor_and_positivity_invariants() {
        // Every three-review sequence over the whole quality scale.
        for a in 0..=5 {
            for b in 0..=5 {
                for c in 0..=5 {
                    let mut state = initial_state();
                    for raw in [a, b, c] {
                        state = next_state(state, quality(raw));
                        assert!(state.ease_factor >= MIN_EASE_FACTOR - EPSILON);
                        assert!(state.interval_days >= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_growth_monotonicity() {
        // Once an item is past its second repetition, a successful review
        // never shrinks the interval.
        for ease in [1.3, 1.7, 2.1, 2.5] {
            for interval in [1, 6, 30, 365, MAX_INTERVAL_DAYS] {
                for raw in 3..=5 {
                    let state = Sm2State {
                        interval_days: interval,
                        ease_factor: ease,
                        repetitions: 2,
                    };
                    let next = next_state(state, quality(raw));
                    assert_eq!(next.repetitions, 3);
                    assert!(
                        next.interval_days >= state.interval_days,
                        "interval {interval} shrank under ease {ease}, quality {raw}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_repetitions_count_consecutive_successes() {
        let mut state = initial_state();
        for expected in 1..=5 {
            state = next_state(state, Quality::GOOD);
            assert_eq!(state.repetitions, expected);
        }
        state = next_state(state, quality(2));
        assert_eq!(state.repetitions, 0);
        state = next_state(state, Quality::GOOD);
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
    }
}
