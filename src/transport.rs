//! Byte transport for the debug serial line.
//!
//! Blocking (bounded) transmit, non-blocking receive, no buffering beyond
//! the peripheral's own FIFO and no framing — raw bytes only. Formatted
//! text goes through the [`core::fmt::Write`] impl.

use core::fmt;

use crate::debug;

/// Wire format the peer expects. Applied by the out-of-scope board init;
/// kept here so firmware and host tooling agree on one definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    pub baud: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

impl Default for LineConfig {
    /// 115200 8-O-1, no flow control.
    fn default() -> Self {
        Self {
            baud: 115_200,
            data_bits: 8,
            stop_bits: 1,
            parity: Parity::Odd,
        }
    }
}

/// Register-level access to the serial peripheral.
///
/// All four operations are immediate; any waiting happens in
/// [`CharTransport`], not behind this trait.
pub trait SerialLine {
    /// Transmit register is empty and will accept a byte.
    fn tx_ready(&self) -> bool;
    /// Write one byte into the transmit register.
    fn tx_write(&mut self, byte: u8);
    /// A received byte is pending in the receive register.
    fn rx_ready(&self) -> bool;
    /// Read one byte out of the receive register.
    fn rx_read(&mut self) -> u8;
}

/// Best-effort debug/telemetry channel over a [`SerialLine`].
///
/// Sends block until the line accepts the byte or a fixed poll budget runs
/// out, in which case the byte is dropped — this is a debug channel, not a
/// control channel, so timeouts are absorbed rather than surfaced.
pub struct CharTransport<L: SerialLine> {
    line: L,
    dropped: u32,
}

impl<L: SerialLine> CharTransport<L> {
    /// Polls of `tx_ready` spent per byte before giving up.
    const SEND_POLL_BUDGET: u32 = 0xFFFF;

    pub fn new(line: L) -> Self {
        Self { line, dropped: 0 }
    }

    /// Send one byte, spinning until the transmit register frees up.
    ///
    /// Bytes from sequential calls leave the line in call order. If the
    /// poll budget runs out the byte is dropped and counted, nothing more.
    pub fn send_byte(&mut self, byte: u8) {
        let mut budget = Self::SEND_POLL_BUDGET;
        while !self.line.tx_ready() {
            budget -= 1;
            if budget == 0 {
                self.dropped = self.dropped.saturating_add(1);
                debug!("debug line wedged, dropping byte");
                return;
            }
        }
        self.line.tx_write(byte);
    }

    /// Send a span of bytes in order, one at a time. No buffering.
    pub fn send_span(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.send_byte(b);
        }
    }

    /// Non-blocking receive: the pending byte if the hardware holds one,
    /// `None` otherwise. Returns immediately either way.
    pub fn recv_byte(&mut self) -> Option<u8> {
        if self.line.rx_ready() {
            Some(self.line.rx_read())
        } else {
            None
        }
    }

    /// Bytes abandoned because the line never came ready within the poll
    /// budget. Saturates rather than wrapping.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped
    }
}

/// Formatted output straight onto the line, with no buffering or
/// backpressure of its own.
impl<L: SerialLine> fmt::Write for CharTransport<L> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_span(s.as_bytes());
        Ok(())
    }
}
