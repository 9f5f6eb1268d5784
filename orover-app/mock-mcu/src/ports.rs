//! Host stand-ins for the two serial channels.
//!
//! The command channel reads from a byte queue fed either by a stdin reader
//! thread or by a prepared transmission, and writes replies to stdout. The
//! debug channel is stderr.

use std::{
    io::{self, Read as _, Write as _},
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};

pub struct HostPort {
    rx: Receiver<u8>,
    pending: Option<u8>,
    closed: bool,
    out: io::Stdout,
}

impl HostPort {
    /// Queue a fixed transmission; the port reports closed once it is read.
    pub fn scripted(data: Vec<u8>) -> Self {
        let (tx, rx) = mpsc::channel();
        for byte in data {
            // Receiver is alive, cannot fail.
            let _ = tx.send(byte);
        }
        Self::from_receiver(rx)
    }

    /// Forward stdin byte by byte from a reader thread.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in io::stdin().lock().bytes() {
                match byte {
                    Ok(b) if tx.send(b).is_ok() => {}
                    Ok(_) => break,
                    Err(error) => {
                        tracing::error!(?error, "stdin read failed");
                        break;
                    }
                }
            }
        });
        Self::from_receiver(rx)
    }

    fn from_receiver(rx: Receiver<u8>) -> Self {
        Self {
            rx,
            pending: None,
            closed: false,
            out: io::stdout(),
        }
    }

    /// No byte buffered and the sender has gone away.
    pub fn is_finished(&self) -> bool {
        self.closed && self.pending.is_none()
    }

    fn fill(&mut self) {
        if self.pending.is_some() || self.closed {
            return;
        }
        match self.rx.try_recv() {
            Ok(byte) => self.pending = Some(byte),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.closed = true,
        }
    }
}

impl ErrorType for HostPort {
    type Error = io::Error;
}

impl ReadReady for HostPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.fill();
        Ok(self.pending.is_some())
    }
}

impl Read for HostPort {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.fill();
        match (buf.first_mut(), self.pending.take()) {
            (Some(slot), Some(byte)) => {
                *slot = byte;
                Ok(1)
            }
            (None, byte) => {
                self.pending = byte;
                Ok(0)
            }
            (Some(_), None) => Ok(0),
        }
    }
}

impl Write for HostPort {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> Result<usize, Self::Error> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.out.flush()
    }
}

/// Debug channel on stderr. Always ready.
pub struct DebugConsole {
    out: io::Stderr,
}

impl DebugConsole {
    pub fn new() -> Self {
        Self { out: io::stderr() }
    }
}

impl ErrorType for DebugConsole {
    type Error = io::Error;
}

impl Write for DebugConsole {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> Result<usize, Self::Error> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.out.flush()
    }
}

impl WriteReady for DebugConsole {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
