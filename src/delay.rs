//! Busy-wait delay over the cycle clock.

use embedded_hal::delay::DelayNs;

use crate::clock::{CycleCounter, MonotonicClock};

/// Blocking microsecond delay that spins on the cycle counter.
///
/// There is no multitasking kernel on this board, so occupying the core is
/// intentional. Never call from interrupt context; the edge handler must
/// stay O(1).
pub struct BusyWaitTimer<C: CycleCounter> {
    clock: MonotonicClock<C>,
}

impl<C: CycleCounter> BusyWaitTimer<C> {
    pub fn new(clock: MonotonicClock<C>) -> Self {
        Self { clock }
    }

    /// Spin until at least `us` microseconds of counter time have passed.
    ///
    /// Correct across a single counter wrap during the wait. Waits longer
    /// than one full counter period (about 42 s at 100 MHz) are out of
    /// contract, as is a clock constructed with the wrong core frequency.
    pub fn delay_us(&mut self, us: u32) {
        let target = self.clock.cycles_per_microsecond().saturating_mul(us);
        let start = self.clock.now();
        while self.clock.elapsed_since(start) < target {
            core::hint::spin_loop();
        }
    }
}

impl<C: CycleCounter> DelayNs for BusyWaitTimer<C> {
    fn delay_ns(&mut self, ns: u32) {
        // Sub-microsecond resolution is below what the spin overhead can
        // honor anyway; round up to the next microsecond.
        BusyWaitTimer::delay_us(self, ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        BusyWaitTimer::delay_us(self, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        BusyWaitTimer::delay_us(self, ms.saturating_mul(1_000));
    }
}
