//! Command channel access.
//!
//! The command channel is any `embedded_io` port that can tell whether a byte
//! is waiting. Polling never blocks: when nothing is available the caller
//! simply tries again on its next iteration.

use embedded_io::{Read, ReadReady, Write};

/// Read one byte if one is available.
pub fn poll_byte<P>(port: &mut P) -> Result<Option<u8>, P::Error>
where
    P: Read + ReadReady,
{
    if !port.read_ready()? {
        return Ok(None);
    }
    let mut byte = [0u8; 1];
    match port.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

/// Write a reply assembled from `parts` and flush it.
pub fn send<P>(
    port: &mut P,
    parts: &[&[u8]],
) -> Result<(), P::Error>
where
    P: Write,
{
    for part in parts {
        port.write_all(part)?;
    }
    port.flush()
}
