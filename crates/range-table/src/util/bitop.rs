//! Bit packing helpers for block signatures and nibble tables

pub mod u16 {
    /// Appends the unary code of `count` to the low end of `sig`.
    ///
    /// The code is `count` one bits followed by a single zero bit, so a sequence of codes can be
    /// decoded from the lowest bit upwards. The caller must keep the total length of all codes
    /// within `u16::BITS`.
    #[inline]
    #[must_use]
    pub const fn push_unary(sig: u16, count: u32) -> u16 {
        debug_assert!(count < u16::BITS);
        let ones = ((1u32 << count) - 1) << 1;
        ((sig as u32) << (count + 1) | ones) as u16
    }

}

pub mod u4 {
    /// Get a u4 (nibble) from a byte array `data` with given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than or equal to the `2 * data.len()`.
    #[inline]
    pub const fn get(data: &[u8], index: usize) -> u8 {
        let i = index >> 1;
        let packed = data[i];
        let shift = (index & 1) << 2;
        (packed >> shift) & 0xF
    }

    /// Set the u4 (nibble) of `data` at given index to the low four bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than or equal to the `2 * data.len()`.
    #[inline]
    pub fn set(data: &mut [u8], index: usize, value: u8) {
        let i = index >> 1;
        let shift = (index & 1) << 2;
        data[i] = (data[i] & !(0xF << shift)) | ((value & 0xF) << shift);
    }

}
