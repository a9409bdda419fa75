//! Stack safety for deep recursion.
//!
//! Recursive user functions recurse through the host stack. `stacker`
//! grows a segmented stack when the red zone runs low, which keeps the
//! documented working ceiling (at least 10^4 nested user calls) well clear
//! of the platform's default thread stack.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (2MB).
    const STACK_PER_GROWTH: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_GROWTH, f)
}
