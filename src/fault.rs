//! Terminal handling for unrecoverable setup failures.
//!
//! There is no recovery path for a peripheral that refuses to come up on
//! this class of hardware: the board parks itself with the signal line
//! driven, and stays there until power-cycle.

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::error;

/// What failed during one-time board bring-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigFault {
    /// Clock tree / PLL configuration was rejected.
    Clock,
    /// Debug serial peripheral failed to initialize.
    Serial,
    /// Cycle counter could not be enabled.
    Counter,
}

impl fmt::Display for ConfigFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigFault::Clock => "clock configuration",
            ConfigFault::Serial => "serial configuration",
            ConfigFault::Counter => "cycle counter setup",
        })
    }
}

/// Log the fault, drive the signal line high, and park the core forever.
///
/// The only diverging path in the system; everything else either succeeds
/// or absorbs its failure locally.
pub fn halt_with_signal<P: OutputPin>(fault: ConfigFault, mut signal: P) -> ! {
    error!("unrecoverable fault: {}", fault);
    // The pin write itself can fail on some HALs; there is nobody left to
    // tell, so the halt proceeds either way.
    let _ = signal.set_high();
    loop {
        core::hint::spin_loop();
    }
}
