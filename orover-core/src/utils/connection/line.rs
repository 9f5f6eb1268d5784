//! Command line framing.
//!
//! Bytes are buffered until the terminator shows up. The terminator itself is
//! never stored. Lines that outgrow the buffer are dropped in full rather than
//! truncated, so a runaway sender cannot produce a half command.

use heapless::Vec;

use crate::utils::config::TERMINATOR;

/// Result of feeding a terminator into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<const N: usize> {
    /// Everything since the previous terminator (possibly empty).
    Line(Vec<u8, N>),
    /// The line exceeded `N` bytes and was discarded.
    Overflow,
}

pub struct LineBuffer<const N: usize> {
    buf: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns a frame when `byte` is the terminator; the
    /// buffer is empty again afterwards.
    pub fn push(
        &mut self,
        byte: u8,
    ) -> Option<Frame<N>> {
        if byte == TERMINATOR {
            let line = core::mem::take(&mut self.buf);
            return if core::mem::take(&mut self.overflowed) {
                Some(Frame::Overflow)
            } else {
                Some(Frame::Line(line))
            };
        }

        if !self.overflowed && self.buf.push(byte).is_err() {
            tracing::warn!(capacity = N, "command line overflow, dropping until terminator");
            self.buf.clear();
            self.overflowed = true;
        }
        None
    }

    /// Bytes received since the last terminator.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
