//! Debounced, interrupt-driven button state.
//!
//! The edge ISR is the only writer; the control loop reads. Both fields of
//! the shared state (logical state + timestamp of the last accepted
//! transition) live in one `AtomicU32`, so a single store commits them
//! together and a reader can never see a fresh flag with a stale timestamp.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::clock::TickCounter;

/// Milliseconds that must pass after an accepted transition before the
/// next edge is honored. Anything quicker is contact bounce.
pub const DEBOUNCE_THRESHOLD_MS: u32 = 400;

const PRESSED: u32 = 1 << 31;
const TICK_MASK: u32 = PRESSED - 1;

/// Two-state toggle fed by a rising-edge interrupt, debounced against the
/// millisecond tick counter.
///
/// `const`-constructible so it can live in a `static` next to its tick
/// source and be reached from the statically-bound interrupt vector:
///
/// ```
/// use np2board::{DebouncedInput, TickCounter};
///
/// static TICKS: TickCounter = TickCounter::new();
/// static BUTTON: DebouncedInput<'static> = DebouncedInput::new(&TICKS);
///
/// assert!(!BUTTON.is_pressed());
/// ```
pub struct DebouncedInput<'a> {
    /// Bit 31: pressed flag. Bits 30..0: tick of the last accepted
    /// transition, milliseconds modulo 2^31.
    packed: AtomicU32,
    ticks: &'a TickCounter,
}

impl<'a> DebouncedInput<'a> {
    /// Starts in the released state with transition tick 0. Edges arriving
    /// within the first debounce window after boot are discarded.
    pub const fn new(ticks: &'a TickCounter) -> Self {
        Self {
            packed: AtomicU32::new(0),
            ticks,
        }
    }

    /// Edge interrupt entry point: flip the logical state if the edge
    /// lands beyond the debounce window, otherwise discard it as bounce.
    ///
    /// O(1) and non-blocking; call from the edge ISR only (single-writer
    /// discipline — concurrent writers would race the load/store pair).
    pub fn on_edge_event(&self) {
        let now = self.ticks.ticks() & TICK_MASK;
        let packed = self.packed.load(Ordering::Relaxed);
        let last = packed & TICK_MASK;
        // Modulo-2^31 interval, valid across a timestamp wrap.
        if now.wrapping_sub(last) & TICK_MASK > DEBOUNCE_THRESHOLD_MS {
            self.packed
                .store(((packed & PRESSED) ^ PRESSED) | now, Ordering::Release);
        }
    }

    /// Latest committed logical state. Single atomic read, never blocks;
    /// intermediate transitions between two polls are not observable.
    pub fn is_pressed(&self) -> bool {
        self.packed.load(Ordering::Acquire) & PRESSED != 0
    }

    /// Tick of the last accepted transition, milliseconds modulo 2^31.
    /// Zero until the first accepted edge.
    pub fn last_transition_tick(&self) -> u32 {
        self.packed.load(Ordering::Acquire) & TICK_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        assert!(!button.is_pressed());
        assert_eq!(button.last_transition_tick(), 0);
    }

    #[test]
    fn edge_at_threshold_is_still_bounce() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        // Guard is strict: elapsed must exceed the window, not meet it.
        ticks.advance_by(DEBOUNCE_THRESHOLD_MS);
        button.on_edge_event();
        assert!(!button.is_pressed());
    }

    #[test]
    fn edge_beyond_threshold_presses() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        ticks.advance_by(DEBOUNCE_THRESHOLD_MS + 1);
        button.on_edge_event();
        assert!(button.is_pressed());
        assert_eq!(button.last_transition_tick(), DEBOUNCE_THRESHOLD_MS + 1);
    }

    #[test]
    fn bounce_train_inside_window_is_suppressed() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        ticks.advance_by(500);
        button.on_edge_event();
        assert!(button.is_pressed());

        // A burst of chatter strictly inside the window changes nothing.
        for step in [1, 10, 50, 139, 200] {
            ticks.advance_by(step);
            button.on_edge_event();
            assert!(button.is_pressed());
            assert_eq!(button.last_transition_tick(), 500);
        }
    }

    #[test]
    fn toggles_on_alternating_accepted_edges() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        let mut expected = false;
        for _ in 0..6 {
            ticks.advance_by(DEBOUNCE_THRESHOLD_MS + 1);
            button.on_edge_event();
            expected = !expected;
            assert_eq!(button.is_pressed(), expected);
        }
    }

    #[test]
    fn rejected_edge_leaves_timestamp_alone() {
        let ticks = TickCounter::new();
        let button = DebouncedInput::new(&ticks);
        ticks.advance_by(401);
        button.on_edge_event();
        ticks.advance_by(100);
        button.on_edge_event();
        assert_eq!(button.last_transition_tick(), 401);
    }

    #[test]
    fn guard_survives_timestamp_wrap_within_window() {
        // Last accepted transition just before the 2^31 packing boundary;
        // the next edge lands just after it, 150 ms later.
        let ticks = TickCounter::starting_at(TICK_MASK - 100);
        let button = DebouncedInput::new(&ticks);
        button.on_edge_event(); // elapsed from tick 0 is huge, accepted
        assert!(button.is_pressed());

        ticks.advance_by(150);
        button.on_edge_event();
        assert!(button.is_pressed(), "150 ms across the wrap is bounce");
    }

    #[test]
    fn guard_survives_timestamp_wrap_beyond_window() {
        let ticks = TickCounter::starting_at(TICK_MASK - 100);
        let button = DebouncedInput::new(&ticks);
        button.on_edge_event();
        assert!(button.is_pressed());

        ticks.advance_by(501);
        button.on_edge_event();
        assert!(!button.is_pressed(), "501 ms across the wrap is a release");
    }

    #[test]
    fn guard_survives_full_counter_wrap() {
        // The raw u32 tick counter rolling over is also a clean modulo-2^31
        // boundary for the packed timestamp.
        let ticks = TickCounter::starting_at(u32::MAX - 100);
        let button = DebouncedInput::new(&ticks);
        button.on_edge_event();
        assert!(button.is_pressed());
        let last = button.last_transition_tick();

        ticks.advance_by(200);
        button.on_edge_event();
        assert!(button.is_pressed());
        assert_eq!(button.last_transition_tick(), last);

        ticks.advance_by(300);
        button.on_edge_event();
        assert!(!button.is_pressed());
    }
}
