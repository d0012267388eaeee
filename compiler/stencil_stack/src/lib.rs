//! Stack safety for recursive template walks.
//!
//! Templates nest through block directives (`#if`, `#foreach`) and through
//! `#parse` includes. Neither has a depth limit, so the parser, the attribute
//! collector and the renderer wrap their recursive steps in
//! [`ensure_sufficient_stack`], which grows the stack on demand instead of
//! overflowing on pathological inputs.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which we grow (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each stack extension (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn walk(&mut self, nodes: &[Node]) {
///     ensure_sufficient_stack(|| {
///         for node in nodes {
///             self.visit(node);
///         }
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
