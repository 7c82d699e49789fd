//! Bucket hashing.

use crate::addr::AllocAddr;

/// 64-bit avalanche finalizer: three xor-shift rounds interleaved with two
/// odd-constant multiplications. Small input differences (addresses are
/// typically aligned and clustered) spread across the full output range.
#[must_use]
pub fn mix64(value: u64) -> u64 {
    let mut v = value;
    v ^= v >> 33;
    v = v.wrapping_mul(0xff51_afd7_ed55_8ccd);
    v ^= v >> 33;
    v = v.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    v ^= v >> 33;
    v
}

/// Bucket index for `addr` in a table with `capacity` buckets.
///
/// `capacity` must be nonzero; the registry maintains that invariant.
#[must_use]
pub(crate) fn bucket_index(addr: AllocAddr, capacity: usize) -> usize {
    (mix64(addr.raw() as u64) % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_is_deterministic() {
        assert_eq!(mix64(0x1000), mix64(0x1000));
        assert_ne!(mix64(0x1000), mix64(0x1008));
    }

    #[test]
    fn bucket_index_stays_in_range() {
        for raw in (0..4096).step_by(16) {
            assert!(bucket_index(AllocAddr::new(raw), 128) < 128);
        }
    }

    #[test]
    fn aligned_addresses_spread_across_buckets() {
        // Sequential 16-byte-aligned addresses are the worst case for a weak
        // hash; the finalizer should fill most of a 128-bucket table.
        let mut seen = [false; 128];
        for i in 0..256 {
            seen[bucket_index(AllocAddr::new(0x1000 + i * 16), 128)] = true;
        }
        let filled = seen.iter().filter(|&&b| b).count();
        assert!(filled > 100, "only {filled} of 128 buckets used");
    }
}
