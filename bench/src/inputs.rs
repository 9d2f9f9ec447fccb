pub const EMPTY: &'static [u8] = b"";

pub const CATS: &'static [u8] =
    b"The wiiiiiiiiiild wild cat lived in a mild climate.";

pub const SHERLOCK_TINY: &'static [u8] = b"\
Mr. Sherlock Holmes, who was usually very late in the mornings, save upon \
those not infrequent occasions when he was up all night, was seated at the \
breakfast table. I stood upon the hearth-rug and picked up the stick which \
our visitor had left behind him the night before.";

/// Returns `unit` repeated `count` times.
///
/// Substring searches consider every pair of offsets, so their cost grows
/// with the square of the haystack length. Keep `count` small.
pub fn repeat(unit: &[u8], count: usize) -> Vec<u8> {
    unit.repeat(count)
}

/// Returns a haystack of `len` bytes over `ab` that ends in `abb`, which
/// makes `(a|b)*abb` match it in full.
pub fn abb(len: usize) -> Vec<u8> {
    let mut hay: Vec<u8> = b"ab".iter().copied().cycle().take(len).collect();
    hay.extend_from_slice(b"abb");
    hay
}
