//! Cortex-M DWT binding for the cycle counter.

use cortex_m::peripheral::{DCB, DWT};

use crate::clock::CycleCounter;
use crate::info;

/// [`CycleCounter`] backed by the DWT cycle counter.
///
/// Construction consumes the `DWT` peripheral, so the counter can only be
/// configured once per boot.
pub struct DwtCycleCounter {
    _dwt: DWT,
}

impl DwtCycleCounter {
    /// Enable trace, zero the counter, and start it.
    ///
    /// Call once at boot, before interrupts are enabled. Not every core
    /// implements the cycle counter; on those this returns `None` and the
    /// caller takes the fatal path.
    pub fn init(dcb: &mut DCB, mut dwt: DWT) -> Option<Self> {
        dcb.enable_trace();
        if !DWT::has_cycle_counter() {
            return None;
        }
        dwt.set_cycle_count(0);
        dwt.enable_cycle_counter();
        info!("cycle counter running");
        Some(Self { _dwt: dwt })
    }
}

impl CycleCounter for DwtCycleCounter {
    fn count(&self) -> u32 {
        DWT::cycle_count()
    }
}
