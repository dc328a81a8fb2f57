//! Wraparound-safe time sources.
//!
//! Two counters drive the board: a free-running hardware cycle counter
//! (read through [`CycleCounter`], wrapped by [`MonotonicClock`]) used for
//! microsecond delays, and a software millisecond [`TickCounter`] advanced
//! by the tick exception, used to timestamp button edges.

use core::sync::atomic::{AtomicU32, Ordering};

/// Read access to a free-running hardware cycle counter.
///
/// The counter increments at a fixed, known frequency and wraps at its bit
/// width. Reads have no side effects and are safe from any context.
pub trait CycleCounter {
    /// Current raw counter value.
    fn count(&self) -> u32;
}

impl<C: CycleCounter + ?Sized> CycleCounter for &C {
    fn count(&self) -> u32 {
        (**self).count()
    }
}

/// Elapsed-time arithmetic over a [`CycleCounter`].
///
/// All comparisons use `wrapping_sub`, so intervals remain correct across
/// a single wrap of the underlying counter. Intervals longer than one full
/// counter period are out of contract.
pub struct MonotonicClock<C: CycleCounter> {
    counter: C,
    cycles_per_us: u32,
}

impl<C: CycleCounter> MonotonicClock<C> {
    /// Wraps `counter`, deriving the cycles-per-microsecond ratio from the
    /// core clock frequency.
    ///
    /// `core_hz` must match the true core clock; there is no way to detect
    /// a mismatch here, it silently scales every derived delay.
    pub fn new(counter: C, core_hz: u32) -> Self {
        Self {
            counter,
            cycles_per_us: core_hz / 1_000_000,
        }
    }

    /// Current raw counter value.
    pub fn now(&self) -> u32 {
        self.counter.count()
    }

    /// Cycles elapsed since `start`, valid across a single counter wrap.
    pub fn elapsed_since(&self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }

    pub fn cycles_per_microsecond(&self) -> u32 {
        self.cycles_per_us
    }
}

/// Millisecond tick counter, advanced by the tick exception.
///
/// Single designated writer (the tick handler), any number of readers.
/// On a single core a plain load/store pair is sufficient; readers always
/// observe either the previous or the new value.
pub struct TickCounter(AtomicU32);

impl TickCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Counter with a preset starting value.
    pub const fn starting_at(ticks: u32) -> Self {
        Self(AtomicU32::new(ticks))
    }

    /// Advance by one tick. Call from the tick handler only.
    pub fn advance(&self) {
        self.advance_by(1);
    }

    /// Advance by `n` ticks, for tick handlers that fire coarser than the
    /// tick unit and account for several at once.
    pub fn advance_by(&self, n: u32) {
        self.0
            .store(self.0.load(Ordering::Relaxed).wrapping_add(n), Ordering::Relaxed);
    }

    /// Ticks since startup, modulo the counter width.
    pub fn ticks(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}
