//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

/// Group on top of the stack. The initial group is never popped.
pub(super) fn ensure_top(stack: &[u32]) -> u32 {
    *stack
        .last()
        .expect("group stack always holds the initial group")
}
