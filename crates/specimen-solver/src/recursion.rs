//! Depth limiting for recursive shape computations.
//!
//! Self-referential declarations (`interface Node { next: Node }`) describe
//! into an unbounded tree. Description generation does not cap recursion on
//! its own; callers that may see such shapes opt in to a [`DepthCounter`]
//! through `DescribeOptions::max_depth`.
//!
//! # Safety
//!
//! - **Debug leak detection**: In debug builds, dropping a counter with
//!   unmatched `enter()` calls panics.
//! - **Sticky exceeded flag**: once the limit is hit, [`is_exceeded`]
//!   stays `true` until [`reset`](DepthCounter::reset).
//!
//! [`is_exceeded`]: DepthCounter::is_exceeded

/// A depth-only recursion counter.
///
/// ```ignore
/// if !counter.enter() {
///     return TypeDescription::UNKNOWN;
/// }
/// let result = recurse();
/// counter.leave();
/// result
/// ```
#[derive(Debug)]
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
    exceeded: bool,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
            exceeded: false,
        }
    }

    /// Try to enter a deeper level.
    ///
    /// Returns `false` (and sets the exceeded flag) at the limit; the depth is
    /// not incremented then, so do **not** call [`leave`](Self::leave).
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave the current level. Must follow every successful `enter()`.
    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "DepthCounter::leave() called at depth 0. \
             This indicates a leave without a matching enter()."
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    pub fn reset(&mut self) {
        self.depth = 0;
        self.exceeded = false;
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!(
                "DepthCounter dropped with depth {}. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.depth,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_until_limit() {
        let mut counter = DepthCounter::new(2);
        assert!(counter.enter());
        assert!(counter.enter());
        assert!(!counter.enter());
        assert!(counter.is_exceeded());
        assert_eq!(counter.depth(), 2);
        counter.leave();
        counter.leave();
        assert_eq!(counter.depth(), 0);
        assert!(counter.is_exceeded());
    }

    #[test]
    fn test_reset_clears_exceeded() {
        let mut counter = DepthCounter::new(0);
        assert!(!counter.enter());
        counter.reset();
        assert!(!counter.is_exceeded());
        assert_eq!(counter.max_depth(), 0);
    }
}
