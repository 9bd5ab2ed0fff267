//! Lock strategies for [`BaseSink`](super::BaseSink). The same sink logic serves one thread
//! (no real lock) or many (a mutex) by swapping the cell that guards its state.

use parking_lot::Mutex;
use std::cell::RefCell;

/// Exclusive access to a value for the duration of a closure.
///
/// The access ends when the closure returns or unwinds.
pub trait SinkCell<T> {
    fn wrap(value: T) -> Self;

    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    fn into_inner(self) -> T;
}

impl<T> SinkCell<T> for Mutex<T> {
    fn wrap(value: T) -> Self {
        Self::new(value)
    }

    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.lock())
    }

    fn into_inner(self) -> T {
        Self::into_inner(self)
    }
}

/// Re-entering a single-threaded sink from its own formatter or writer panics.
impl<T> SinkCell<T> for RefCell<T> {
    fn wrap(value: T) -> Self {
        Self::new(value)
    }

    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn into_inner(self) -> T {
        Self::into_inner(self)
    }
}

/// Picks the cell type a sink guards its state with.
pub trait Locking: 'static {
    type Cell<T: Send>: SinkCell<T> + Send;
}

/// `parking_lot::Mutex`; the sink is `Sync` and can sit behind an `Arc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiThreaded;

impl Locking for MultiThreaded {
    type Cell<T: Send> = Mutex<T>;
}

/// `RefCell`; no locking cost, and the sink is `!Sync` so the compiler keeps it on one thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleThreaded;

impl Locking for SingleThreaded {
    type Cell<T: Send> = RefCell<T>;
}
