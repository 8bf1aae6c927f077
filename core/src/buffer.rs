//! Double buffer with per-buffer playback state
//!
//! Each buffer cycles `Free -> InFlight -> Free`:
//! - the refill path marks it `InFlight` after a successful submit
//! - the completion path marks it `Free` once the device has played it
//!
//! The set tracks which buffer the refill path inspects next and only moves on
//! after that buffer has been submitted, giving strict 0, 1, 0, 1 alternation.

use std::fmt;

use crate::format::Sample;

/// Number of buffers in a set
pub const BUFFER_COUNT: usize = 2;

/// Identifies one of the two buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u8);

impl BufferId {
    pub const FIRST: BufferId = BufferId(0);
    pub const SECOND: BufferId = BufferId(1);

    /// Id for a raw index, `None` if out of range
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::FIRST),
            1 => Some(Self::SECOND),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The other buffer of the pair
    pub fn other(self) -> Self {
        BufferId(1 - self.0)
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playback state of a single buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Played out (or never submitted); may be refilled
    Free,
    /// Handed to the driver, waiting for its completion
    InFlight,
}

/// Fixed-size block of samples plus its playback state
#[derive(Debug)]
pub struct Buffer {
    samples: Box<[Sample]>,
    state: BufferState,
}

impl Buffer {
    fn new(len: usize) -> Self {
        Self {
            samples: vec![0; len].into_boxed_slice(),
            state: BufferState::Free,
        }
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn is_free(&self) -> bool {
        self.state == BufferState::Free
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The two playback buffers and the index of the next one to refill
#[derive(Debug)]
pub struct BufferSet {
    buffers: [Buffer; BUFFER_COUNT],
    current: BufferId,
}

impl BufferSet {
    /// Create a set of two `len`-sample buffers, both free, starting at buffer 0.
    ///
    /// `len` is clamped to at least one sample.
    pub fn new(len: usize) -> Self {
        let len = len.max(1);
        Self {
            buffers: [Buffer::new(len), Buffer::new(len)],
            current: BufferId::FIRST,
        }
    }

    /// Buffer the refill path inspects next
    pub fn current(&self) -> BufferId {
        self.current
    }

    pub fn get(&self, id: BufferId) -> &Buffer {
        &self.buffers[id.index()]
    }

    pub fn get_mut(&mut self, id: BufferId) -> &mut Buffer {
        &mut self.buffers[id.index()]
    }

    /// Samples per buffer
    pub fn buffer_len(&self) -> usize {
        self.buffers[0].len()
    }

    /// Record a successful submit of the current buffer and move to the other one.
    pub fn mark_submitted(&mut self) {
        self.buffers[self.current.index()].state = BufferState::InFlight;
        self.current = self.current.other();
    }

    /// Record that the device finished playing `id`.
    ///
    /// Returns `false` if the buffer was not in flight (stray completion).
    pub fn mark_free(&mut self, id: BufferId) -> bool {
        let buffer = &mut self.buffers[id.index()];
        let was_in_flight = buffer.state == BufferState::InFlight;
        buffer.state = BufferState::Free;
        was_in_flight
    }

    /// Number of buffers currently handed to the driver
    pub fn in_flight(&self) -> usize {
        self.buffers.iter().filter(|b| !b.is_free()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_id_other() {
        assert_eq!(BufferId::FIRST.other(), BufferId::SECOND);
        assert_eq!(BufferId::SECOND.other(), BufferId::FIRST);
        assert_eq!(BufferId::from_index(1), Some(BufferId::SECOND));
        assert_eq!(BufferId::from_index(2), None);
        assert_eq!(BufferId::SECOND.to_string(), "#1");
    }

    #[test]
    fn test_new_set_is_free_at_first() {
        let set = BufferSet::new(16);
        assert_eq!(set.current(), BufferId::FIRST);
        assert_eq!(set.in_flight(), 0);
        assert_eq!(set.buffer_len(), 16);
        assert!(set.get(BufferId::FIRST).is_free());
        assert!(set.get(BufferId::SECOND).is_free());
    }

    #[test]
    fn test_zero_length_is_clamped() {
        assert_eq!(BufferSet::new(0).buffer_len(), 1);
    }

    #[test]
    fn test_submit_then_free_cycle() {
        let mut set = BufferSet::new(4);
        set.mark_submitted();
        assert_eq!(set.current(), BufferId::SECOND);
        assert_eq!(set.get(BufferId::FIRST).state(), BufferState::InFlight);

        set.mark_submitted();
        assert_eq!(set.current(), BufferId::FIRST);
        assert_eq!(set.in_flight(), 2);

        assert!(set.mark_free(BufferId::FIRST));
        assert_eq!(set.in_flight(), 1);
        assert!(set.get(BufferId::FIRST).is_free());
    }

    #[test]
    fn test_stray_completion_reported() {
        let mut set = BufferSet::new(4);
        assert!(!set.mark_free(BufferId::SECOND));
        assert!(set.get(BufferId::SECOND).is_free());
    }
}
