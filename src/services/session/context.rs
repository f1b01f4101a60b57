use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of the serialized context that player callbacks and session
/// commands are delivered on.
///
/// A connector is fixed to one context for its whole life and only accepts
/// players bound to the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExecutionContext(u64);

impl ExecutionContext {
    /// The application's main context.
    pub const MAIN: Self = Self(0);

    /// Allocate a context distinct from every other one in this process.
    pub fn unique() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric identifier of this context
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::MAIN {
            write!(f, "main context")
        } else {
            write!(f, "context #{}", self.0)
        }
    }
}
