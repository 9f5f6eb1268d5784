//! Diagnostic console.
//!
//! Human readable status lines for whoever is watching the debug port. Lines
//! end in CRLF so a plain terminal (`screen /dev/ttyACM0 9600`) renders them.
//!
//! Writes are best effort: a stalled or unplugged debug port must never stop
//! the command loop, so transmit errors are dropped here.

use core::fmt;

use embedded_io::{Write, WriteReady};

pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_str(
        &mut self,
        s: &str,
    ) {
        let _ = self.out.write_all(s.as_bytes());
    }

    /// Write a formatted line followed by CRLF.
    pub fn println(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let _ = fmt::Write::write_fmt(self, args);
        self.write_str("\r\n");
        let _ = self.out.flush();
    }

    pub fn inner(&self) -> &W {
        &self.out
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write + WriteReady> Console<W> {
    /// Spin until the port accepts data. Returns early if the port reports an
    /// error, since there is nobody to tell about it.
    pub fn wait_ready(&mut self) {
        while let Ok(false) = self.out.write_ready() {
            core::hint::spin_loop();
        }
    }
}

impl<W: Write> fmt::Write for Console<W> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        Console::write_str(self, s);
        Ok(())
    }
}
