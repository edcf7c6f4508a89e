// Bit stream
//------------------------------------------------------------------------------

/// Append-only MSB-first bit accumulator. Bits are never unset or truncated
/// once written.
#[derive(Debug, Clone)]
pub struct BitStream {
    data: [u8; MAX_PAYLOAD_SIZE],
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(
            capacity <= MAX_PAYLOAD_SIZE << 3,
            "Capacity exceeds max payload size: {capacity}"
        );

        Self { data: [0; MAX_PAYLOAD_SIZE], len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Bit index out of range: {index}");

        self.data[index >> 3] & (0b10000000 >> (index & 7)) != 0
    }

    /// Appends the `size` low bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(
            size >= (16 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            self.data[self.len >> 3] |= 0b10000000 >> (self.len & 7);
        }
        self.len += 1;
    }
}


// Global constants
//------------------------------------------------------------------------------

const MAX_PAYLOAD_SIZE: usize = 3706;
