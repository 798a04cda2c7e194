//! Bounded scratch buffer for one rendered instruction.

use crate::error::RenderError;

/// Default scratch capacity in bytes, one of which is reserved for the
/// terminator, so at most 31 bytes of text fit.
pub const DEFAULT_CAPACITY: usize = 32;

/// Append-only text buffer that refuses writes past its capacity.
///
/// The last byte of `capacity` is reserved for the terminator, matching the
/// NUL-terminated scratch this buffer stands in for. A failed append leaves
/// the buffer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    capacity: usize,
}

impl OutputBuffer {
    /// Creates an empty buffer holding at most `capacity - 1` text bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Configured capacity, terminator included.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes of text written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true when nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Appends one character.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CapacityExceeded`] if the character does not fit.
    pub fn push(&mut self, c: char) -> Result<(), RenderError> {
        self.reserve(c.len_utf8())?;
        self.text.push(c);
        Ok(())
    }

    /// Appends a string slice, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CapacityExceeded`] if `s` does not fit whole.
    pub fn push_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.reserve(s.len())?;
        self.text.push_str(s);
        Ok(())
    }

    /// Consumes the buffer, yielding the finished text.
    #[must_use]
    pub fn finish(self) -> String {
        self.text
    }

    fn reserve(&self, additional: usize) -> Result<(), RenderError> {
        let needed = self
            .text
            .len()
            .checked_add(additional)
            .and_then(|n| n.checked_add(1));
        match needed {
            Some(n) if n <= self.capacity => Ok(()),
            _ => Err(RenderError::CapacityExceeded {
                capacity: self.capacity,
            }),
        }
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
