//! bit helpers for column bitboards - pext with a portable fallback

/// Parallel bit extract: gathers the bits of `src` selected by `mask` into the
/// low end of the result, preserving order.
#[inline(always)]
pub fn pext(src: u32, mask: u32) -> u32 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: gated on the bmi2 target feature being enabled at compile time
        unsafe { core::arch::x86_64::_pext_u32(src, mask) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        pext_portable(src, mask)
    }
}

#[inline]
pub fn pext_portable(src: u32, mask: u32) -> u32 {
    let mut out = 0u32;
    let mut m = mask;
    let mut k = 0;
    while m != 0 {
        let bit = m & m.wrapping_neg();
        if src & bit != 0 {
            out |= 1 << k;
        }
        k += 1;
        m &= m - 1;
    }
    out
}

/// Mask of the lowest `n` bits; saturates at 32.
#[inline(always)]
pub const fn low_mask(n: u32) -> u32 {
    if n >= 32 {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}
