#[inline]
pub const fn bool_from_bit(value: u8) -> bool {
    (value & 0b1) == 0b1
}

#[inline]
pub const fn bool_to_bit(value: bool) -> u8 {
    match value {
        true => 0b1,
        false => 0b0,
    }
}

/// Extract the field selected by `mask` and shift it down to bit 0.
#[inline]
pub const fn get_masked(byte: u8, mask: u8) -> u8 {
    (byte & mask) >> mask.trailing_zeros()
}

/// Replace the field selected by `mask` with `value`, extra high bits of `value` are dropped.
#[inline]
pub const fn set_masked(byte: u8, mask: u8, value: u8) -> u8 {
    (byte & !mask) | ((value << mask.trailing_zeros()) & mask)
}
