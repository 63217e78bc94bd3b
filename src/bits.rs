//! Fixed-size capability bitmasks.
//!
//! evdev reports capabilities as little bit vectors: bit `n` of byte `n / 8`
//! says whether event type (or code) `n` is supported. [`BitMask`] wraps such
//! a buffer without allocating, so probes can keep it on the stack.

use crate::codes;

/// An opaque, fixed-size bit vector filled in by a capability query.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitMask<const BYTES: usize> {
    bytes: [u8; BYTES],
}

/// Coarse mask: one bit per event type (`EV_*`).
pub type EventTypeBits = BitMask<{ codes::EV_CNT / 8 }>;

/// Fine mask: one bit per event code within a type. Sized for `EV_KEY`, the widest.
pub type CodeBits = BitMask<{ codes::KEY_CNT / 8 }>;

impl<const BYTES: usize> BitMask<BYTES> {
    /// Number of addressable bits.
    pub const BITS: usize = BYTES * 8;

    /// An all-clear mask.
    pub const fn new() -> Self {
        Self { bytes: [0; BYTES] }
    }

    /// Build a mask with the given bits set. Out-of-range bits are ignored.
    pub fn from_bits(bits: &[u16]) -> Self {
        let mut mask = Self::new();
        for &bit in bits {
            mask.set(bit);
        }
        mask
    }

    /// `true` if `bit` is set. Bits past the end of the buffer read as clear.
    #[inline]
    pub fn is_set(&self, bit: u16) -> bool {
        let bit = bit as usize;
        bit < Self::BITS && self.bytes[bit / 8] & (1 << (bit % 8)) != 0
    }

    /// Set `bit`; no-op when out of range.
    #[inline]
    pub fn set(&mut self, bit: u16) {
        let bit = bit as usize;
        if bit < Self::BITS {
            self.bytes[bit / 8] |= 1 << (bit % 8);
        }
    }

    /// `true` if at least one of `bits` is set.
    pub fn any_of(&self, bits: &[u16]) -> bool {
        bits.iter().any(|&b| self.is_set(b))
    }

    /// Raw buffer, for ioctls that fill it in place.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; BYTES] {
        &mut self.bytes
    }

    pub fn as_bytes(&self) -> &[u8; BYTES] {
        &self.bytes
    }
}

impl<const BYTES: usize> Default for BitMask<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BYTES: usize> std::fmt::Debug for BitMask<BYTES> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set: Vec<usize> = (0..Self::BITS).filter(|&b| self.is_set(b as u16)).collect();
        f.debug_tuple("BitMask").field(&set).finish()
    }
}
