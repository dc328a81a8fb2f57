#![cfg_attr(not(feature = "std"), no_std)]

//! Support crate for a single-button, single-LED debug board.
//!
//! Provides the pieces of the firmware where ordering actually matters:
//! a wraparound-safe cycle clock with a busy-wait delay built on top, an
//! interrupt-driven debounced button shared with the polling loop through
//! a single packed atomic word, and a byte transport for the debug serial
//! line (blocking send, non-blocking receive).
//!
//! Everything hardware-facing sits behind a small trait, so the crate
//! builds and tests on the host by default. Target builds turn off the
//! default features and enable `cortex-m` for the DWT counter binding:
//!
//! ```toml
//! np2board = { version = "0.1", default-features = false, features = ["cortex-m", "defmt"] }
//! ```
//!
//! Typical firmware wiring:
//!
//! ```ignore
//! static TICKS: TickCounter = TickCounter::new();
//! static BUTTON: DebouncedInput<'static> = DebouncedInput::new(&TICKS);
//!
//! #[exception]
//! fn SysTick() {
//!     TICKS.advance();
//! }
//!
//! #[interrupt]
//! fn EXTI15_10() {
//!     // clear the pending flag, then:
//!     BUTTON.on_edge_event();
//! }
//!
//! #[entry]
//! fn main() -> ! {
//!     let counter = match DwtCycleCounter::init(&mut core.DCB, core.DWT) {
//!         Some(c) => c,
//!         None => halt_with_signal(ConfigFault::Counter, led),
//!     };
//!     let mut delay = BusyWaitTimer::new(MonotonicClock::new(counter, 100_000_000));
//!     loop {
//!         delay.delay_us(400_000);
//!         if BUTTON.is_pressed() { led.toggle() } else { led.set_low() }
//!     }
//! }
//! ```

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(all(feature = "std", not(feature = "defmt")))]
        log::debug!($($arg)*);
    }};
}
macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
        #[cfg(all(feature = "std", not(feature = "defmt")))]
        log::info!($($arg)*);
    }};
}
macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::error!($($arg)*);
        #[cfg(all(feature = "std", not(feature = "defmt")))]
        log::error!($($arg)*);
    }};
}
pub(crate) use {debug, error, info};

pub mod button;
pub mod clock;
pub mod delay;
pub mod fault;
pub mod transport;

#[cfg(feature = "cortex-m")]
pub mod dwt;

pub use button::{DebouncedInput, DEBOUNCE_THRESHOLD_MS};
pub use clock::{CycleCounter, MonotonicClock, TickCounter};
pub use delay::BusyWaitTimer;
pub use fault::{halt_with_signal, ConfigFault};
pub use transport::{CharTransport, LineConfig, Parity, SerialLine};

#[cfg(feature = "cortex-m")]
pub use dwt::DwtCycleCounter;
