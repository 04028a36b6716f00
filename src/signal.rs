//! Bounds-checked field extraction from assembled payloads.
//!
//! Diagnostic replies encode multi-byte fields most significant byte first.
//! Every accessor here is total: an offset or width that does not fit inside
//! the buffer yields `None` instead of panicking, so a mistyped offset in a
//! decode table only leaves that one field unset.

/// Widest integer field, in bytes, that can be composed into a `u64`.
pub const MAX_FIELD_WIDTH: usize = 8;

/// Compose `width` bytes at `offset` into an unsigned big-endian integer.
///
/// Returns `None` when `offset + width` exceeds the buffer length or when
/// `width` is wider than [`MAX_FIELD_WIDTH`]. A zero-width read inside the
/// buffer yields `0`.
///
/// # Examples
///
/// ```
/// use pollframe::signal::read_uint_be;
///
/// assert_eq!(read_uint_be(&[0x01, 0x02], 0, 2), Some(0x0102));
/// assert_eq!(read_uint_be(&[0x01, 0x02], 1, 2), None);
/// ```
#[must_use]
pub fn read_uint_be(buffer: &[u8], offset: usize, width: usize) -> Option<u64> {
    let bytes = field(buffer, offset, width)?;
    let mut padded = [0u8; MAX_FIELD_WIDTH];
    padded[MAX_FIELD_WIDTH - width..].copy_from_slice(bytes);
    #[expect(
        clippy::big_endian_bytes,
        reason = "Diagnostic payloads encode fields most significant byte first."
    )]
    let value = u64::from_be_bytes(padded);
    Some(value)
}

/// Compose `width` bytes at `offset` into a signed big-endian integer.
///
/// The value is sign-extended from the most significant bit of the first
/// byte read. Bounds follow [`read_uint_be`].
///
/// # Examples
///
/// ```
/// use pollframe::signal::read_int_be;
///
/// assert_eq!(read_int_be(&[0xff, 0xfe], 0, 2), Some(-2));
/// assert_eq!(read_int_be(&[0x7f], 0, 1), Some(127));
/// assert_eq!(read_int_be(&[0x80], 0, 2), None);
/// ```
#[must_use]
pub fn read_int_be(buffer: &[u8], offset: usize, width: usize) -> Option<i64> {
    let raw = read_uint_be(buffer, offset, width)?;
    if width == 0 {
        return Some(0);
    }
    let shift = u32::try_from((MAX_FIELD_WIDTH - width) * 8).ok()?;
    #[expect(
        clippy::cast_possible_wrap,
        reason = "Reinterpreting the left-aligned bits as two's complement is the point."
    )]
    let signed = (raw << shift) as i64;
    Some(signed >> shift)
}

/// Extract bit `BIT` (0 = least significant) from an already-read value.
///
/// The bit position is checked at compile time against the 64-bit value
/// width.
///
/// # Examples
///
/// ```
/// use pollframe::signal::read_bit;
///
/// assert!(read_bit::<6>(0b0100_0000u8));
/// assert!(!read_bit::<0>(0b0100_0000u8));
/// ```
#[must_use]
pub fn read_bit<const BIT: u32>(value: impl Into<u64>) -> bool {
    const { assert!(BIT < u64::BITS, "bit index exceeds value width") };
    (value.into() >> BIT) & 1 == 1
}

/// Copy `length` bytes at `offset` as text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so any
/// in-bounds read produces a string.
///
/// # Examples
///
/// ```
/// use pollframe::signal::read_fixed_string;
///
/// assert_eq!(read_fixed_string(b"xxKNDC", 2, 4).as_deref(), Some("KNDC"));
/// assert_eq!(read_fixed_string(b"xx", 1, 4), None);
/// ```
#[must_use]
pub fn read_fixed_string(buffer: &[u8], offset: usize, length: usize) -> Option<String> {
    let end = offset.checked_add(length)?;
    let bytes = buffer.get(offset..end)?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}

/// Read one unsigned byte.
#[must_use]
pub fn read_u8(buffer: &[u8], offset: usize) -> Option<u8> { buffer.get(offset).copied() }

/// Read one byte as a two's-complement signed value.
#[must_use]
pub fn read_i8(buffer: &[u8], offset: usize) -> Option<i8> {
    read_u8(buffer, offset).map(|byte| i8::from_be_bytes([byte]))
}

/// Read a big-endian `u16`.
#[must_use]
pub fn read_u16_be(buffer: &[u8], offset: usize) -> Option<u16> {
    read_uint_be(buffer, offset, 2).and_then(|value| u16::try_from(value).ok())
}

/// Read a big-endian `i16`.
#[must_use]
pub fn read_i16_be(buffer: &[u8], offset: usize) -> Option<i16> {
    read_int_be(buffer, offset, 2).and_then(|value| i16::try_from(value).ok())
}

/// Read an unsigned big-endian field of up to four bytes into a `u32`.
///
/// Returns `None` for widths above four as well as for out-of-bounds reads.
#[must_use]
pub fn read_u32_be(buffer: &[u8], offset: usize, width: usize) -> Option<u32> {
    if width > 4 {
        return None;
    }
    read_uint_be(buffer, offset, width).and_then(|value| u32::try_from(value).ok())
}

fn field(buffer: &[u8], offset: usize, width: usize) -> Option<&[u8]> {
    if width > MAX_FIELD_WIDTH {
        return None;
    }
    let end = offset.checked_add(width)?;
    buffer.get(offset..end)
}
