//! Byte transport and line assembly for the command channel
//!
//! The control loop never blocks on the serial port: [`SerialLink`]
//! reads are non-blocking, with `nb::Error::WouldBlock` meaning no byte
//! is pending. Commands that arrive while a measurement window is
//! running simply stay queued in the host transport until the next loop
//! iteration drains them.

use core::convert::Infallible;

/// Non-blocking byte source for the command channel.
pub trait SerialLink {
    /// Read one pending byte, or `WouldBlock` when the queue is empty.
    fn read_byte(&mut self) -> nb::Result<u8, Infallible>;
}

/// Assembles incoming bytes into newline-terminated lines.
///
/// Carriage returns are stripped; bytes beyond the line capacity are
/// dropped, truncating overlong lines rather than stalling the channel.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    buf: heapless::String<N>,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty line buffer.
    pub const fn new() -> Self {
        Self {
            buf: heapless::String::new(),
        }
    }

    /// Feed one byte; returns the completed line on `\n`.
    pub fn push(&mut self, byte: u8) -> Option<heapless::String<N>> {
        match byte {
            b'\n' => {
                let line = self.buf.clone();
                self.buf.clear();
                Some(line)
            }
            b'\r' => None,
            other => {
                // Overflow drops the byte; the line is truncated, not lost.
                self.buf.push(other as char).ok();
                None
            }
        }
    }

    /// Drain pending bytes from `link`, yielding at most one complete
    /// line per call so the control loop stays bounded.
    pub fn poll_line<L: SerialLink>(&mut self, link: &mut L) -> Option<heapless::String<N>> {
        loop {
            match link.read_byte() {
                Ok(byte) => {
                    if let Some(line) = self.push(byte) {
                        return Some(line);
                    }
                }
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }
}

/// In-memory link fed from a fixed byte script, for tests and host
/// simulation. Reads return `WouldBlock` once the script is exhausted.
#[derive(Debug)]
pub struct ScriptedLink<const N: usize> {
    queue: heapless::Deque<u8, N>,
}

impl<const N: usize> ScriptedLink<N> {
    /// Create an empty link.
    pub fn new() -> Self {
        Self {
            queue: heapless::Deque::new(),
        }
    }

    /// Queue bytes for later reads. Bytes beyond capacity are dropped,
    /// mirroring a saturated hardware FIFO.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.queue.push_back(byte).is_err() {
                break;
            }
        }
    }
}

impl<const N: usize> Default for ScriptedLink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SerialLink for ScriptedLink<N> {
    fn read_byte(&mut self) -> nb::Result<u8, Infallible> {
        self.queue.pop_front().ok_or(nb::Error::WouldBlock)
    }
}
