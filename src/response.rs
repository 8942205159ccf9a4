//! Turning a raw HTTP response into a document buffer.
//!
//! Responses arrive one byte at a time and end with a NUL byte. Everything up to the
//! first empty line is header and gets dropped; what follows is kept as the body.

use std::mem;

/// Body capacity of the receive buffer on the weather display.
pub const DEFAULT_BODY_CAPACITY: usize = 320;

/// Tracks the end of the header section: two line feeds in a row, where carriage returns
/// in between don't break the run.
#[derive(Debug, Default)]
struct HeaderSkipper {
    newlines: u8,
}

impl HeaderSkipper {
    fn done(&self) -> bool {
        self.newlines >= 2
    }

    fn feed(&mut self, byte: u8) -> bool {
        /* Returns true when `byte` is the one that ends the headers */
        match byte {
            b'\n' => self.newlines += 1,
            b'\r' => {}
            _ => self.newlines = 0,
        }
        self.done()
    }
}

/// Collects the body of one response at a time from a byte stream.
#[derive(Debug)]
pub struct BodyReceiver {
    headers: HeaderSkipper,
    body: Vec<u8>,
    capacity: usize,
    ready: bool,
    overflowed: usize,
}

impl BodyReceiver {
    pub fn new(capacity: usize) -> Self {
        Self {
            headers: HeaderSkipper::default(),
            body: Vec::with_capacity(capacity),
            capacity,
            ready: false,
            overflowed: 0,
        }
    }

    /// Feeds one received byte. Returns the complete body once the terminating NUL arrives.
    ///
    /// While a completed body is waiting to be taken with [BodyReceiver::take_body], any
    /// further bytes are ignored. Body bytes beyond the capacity are dropped and counted.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if self.ready {
            return None;
        }

        if byte == 0 {
            self.ready = true;
            self.headers = HeaderSkipper::default();
            tracing::trace!(
                len = self.body.len(),
                dropped = self.overflowed,
                "response complete"
            );
            return Some(self.body.as_slice());
        }

        if !self.headers.done() {
            if self.headers.feed(byte) {
                tracing::trace!("end of response headers");
            }
            return None;
        }

        if self.body.len() >= self.capacity {
            if self.overflowed == 0 {
                tracing::warn!(
                    capacity = self.capacity,
                    "response body overflows the buffer, dropping bytes"
                );
            }
            self.overflowed += 1;
            return None;
        }

        self.body.push(byte);
        None
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The completed body, if there is one waiting.
    pub fn body(&self) -> Option<&[u8]> {
        self.ready.then_some(self.body.as_slice())
    }

    /// Takes the completed body out and starts listening for the next response.
    pub fn take_body(&mut self) -> Option<Vec<u8>> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        self.overflowed = 0;
        Some(mem::replace(&mut self.body, Vec::with_capacity(self.capacity)))
    }

    /// Number of body bytes dropped because the buffer was full.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }
}

impl Default for BodyReceiver {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_CAPACITY)
    }
}

/// Returns the body of a complete response held in memory: everything after the header
/// section, up to the first NUL byte. `None` if the headers never end.
pub fn extract_body(raw: &[u8]) -> Option<&[u8]> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let raw = &raw[..end];

    let mut headers = HeaderSkipper::default();
    let header_end = raw.iter().position(|&b| headers.feed(b))?;
    Some(&raw[header_end + 1..])
}
