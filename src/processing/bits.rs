//! Least-significant-bit primitives.

/// Clear the lowest bit of `value`, then set it if `bit` is true.
///
/// Works on any packed pixel word; nothing above bit 0 changes.
pub fn set_lsb(value: u32, bit: bool) -> u32 {
    ((value >> 1) << 1) | u32::from(bit)
}

/// Lowest bit of `value` (0 or 1).
pub fn get_lsb(value: u32) -> u32 {
    value & 1
}

/// The 8 bits of `byte`, most significant first.
pub fn byte_bits(byte: u8) -> impl Iterator<Item = bool> {
    (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1)
}
