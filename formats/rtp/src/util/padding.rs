/// Zero bytes needed to align `size` to a 32-bit word.
pub(crate) fn rtp_get_padding_size(size: usize) -> usize {
    (4 - (size % 4)) % 4
}

/// 32-bit words occupied by `size` bytes once padded.
pub(crate) fn rtp_get_padded_words(size: usize) -> usize {
    (size + rtp_get_padding_size(size)) / 4
}
