//! Transfer cursors
//!
//! Foreground code initialises a cursor in the same critical section that
//! arms the transfer; after that only the interrupt handler moves it.

/// Outgoing data for the transfer in flight
#[derive(Debug, Clone, Copy)]
pub struct TxCursor {
    data: &'static [u8],
    next: usize,
    remaining: usize,
}

impl Default for TxCursor {
    fn default() -> Self {
        Self::idle()
    }
}

impl TxCursor {
    pub const fn idle() -> Self {
        Self { data: &[], next: 0, remaining: 0 }
    }

    /// Arm for `data` and return the byte to prime the TX register with
    ///
    /// Empty `data` arms nothing and returns `None`.
    pub fn arm(&mut self, data: &'static [u8]) -> Option<u8> {
        let (&first, rest) = data.split_first()?;
        self.data = data;
        self.next = 1;
        self.remaining = rest.len();
        Some(first)
    }

    /// Next byte to load, if any
    pub fn advance(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let byte = self.data.get(self.next).copied()?;
        self.next += 1;
        self.remaining -= 1;
        Some(byte)
    }

    /// Length of the armed transfer
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Received-data bookkeeping over the active endpoint's buffer
///
/// Asynchronous modes treat the buffer as a ring: `head` is the next write
/// position and `count` the number of unread bytes. Synchronous reads
/// capture from offset zero until `count` reaches `requested`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxCursor {
    head: usize,
    count: usize,
    requested: usize,
}

impl RxCursor {
    /// Drop everything buffered
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// Bytes available (ring) or captured (synchronous read)
    pub fn count(&self) -> usize {
        self.count
    }

    /// Append to the ring, returning `false` when it is full
    pub fn push(&mut self, buf: &mut [u8], byte: u8) -> bool {
        if self.count >= buf.len() {
            return false;
        }
        buf[self.head] = byte;
        self.head = (self.head + 1) % buf.len();
        self.count += 1;
        true
    }

    /// Consume up to `len` bytes from the ring, copying them into `out`
    ///
    /// Bytes are copied oldest first; `out` may be shorter than `len`, in
    /// which case the remainder is consumed without being copied.
    pub fn drain(&mut self, buf: &[u8], len: usize, out: &mut [u8]) -> usize {
        let n = len.min(self.count);
        if n == 0 {
            return 0;
        }
        let tail = (self.head + buf.len() - self.count) % buf.len();
        for (i, slot) in out.iter_mut().take(n).enumerate() {
            *slot = buf[(tail + i) % buf.len()];
        }
        self.count -= n;
        n
    }

    /// Start a synchronous read of `len` bytes
    pub fn arm_capture(&mut self, len: usize) {
        self.head = 0;
        self.count = 0;
        self.requested = len;
    }

    /// Store one captured byte, returning `true` once the read is complete
    pub fn capture(&mut self, buf: &mut [u8], byte: u8) -> bool {
        if let Some(slot) = buf.get_mut(self.count) {
            *slot = byte;
            self.count += 1;
        }
        self.count >= self.requested
    }
}
