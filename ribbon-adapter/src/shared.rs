use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ribbon::ItemSource;

use crate::{Controller, Dispatch, InputEvent};

/// A cloneable, single-threaded handle to a [`Controller`].
///
/// Hosts wire the same handle into every event callback. Entry points are non-reentrant: a
/// call made while another call on the same ribbon is still running (for example from an
/// [`ItemSource::place`] implementation that reacts to layout by calling back in) is dropped
/// and reported as `None`, instead of recursing into a half-finished layout pass.
pub struct SharedRibbon<S: ItemSource> {
    inner: Rc<RefCell<Controller<S>>>,
}

impl<S: ItemSource> Clone for SharedRibbon<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// A non-owning [`SharedRibbon`], for callbacks stored inside the ribbon's own source.
pub struct WeakRibbon<S: ItemSource> {
    inner: Weak<RefCell<Controller<S>>>,
}

impl<S: ItemSource> Clone for WeakRibbon<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S: ItemSource> WeakRibbon<S> {
    pub fn upgrade(&self) -> Option<SharedRibbon<S>> {
        self.inner.upgrade().map(|inner| SharedRibbon { inner })
    }
}

impl<S: ItemSource> SharedRibbon<S> {
    pub fn new(controller: Controller<S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn downgrade(&self) -> WeakRibbon<S> {
        WeakRibbon {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs `f` against the controller, unless a call is already in progress.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<S>) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut controller) => Some(f(&mut controller)),
            Err(_) => {
                atrace!("re-entrant ribbon call dropped");
                None
            }
        }
    }

    /// Reads from the controller. `None` while a mutating call is in progress.
    pub fn inspect<R>(&self, f: impl FnOnce(&Controller<S>) -> R) -> Option<R> {
        self.inner.try_borrow().ok().map(|controller| f(&controller))
    }

    pub fn dispatch(&self, event: InputEvent) -> Option<Dispatch> {
        self.with(|c| c.dispatch(event))
    }

    pub fn tick(&self, now_ms: u64) -> Option<f64> {
        self.with(|c| c.tick(now_ms)).flatten()
    }

    pub fn go_to_index(&self, index: i64) -> Option<ribbon::Result<()>> {
        self.with(|c| c.go_to_index(index))
    }

    /// Re-runs layout. Returns `false` when the call was dropped as re-entrant.
    pub fn refresh(&self) -> bool {
        self.with(|c| c.refresh()).is_some()
    }

    pub fn selected_index(&self) -> Option<i64> {
        self.inspect(|c| c.selected_index())
    }
}
