//! Listener registry with scoped subscriptions.
//!
//! Every registration returns a [`Subscription`] guard. Dropping the guard
//! removes the listener, so a component that stores its guards releases them
//! on every exit path, including early returns and teardown.
//!
//! Dispatch works on a snapshot of the listener list. A listener may drop its
//! own (or any other) subscription while being called; removal takes effect
//! for the next emission.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct Registry<F: ?Sized> {
    next_id: u64,
    slots: Vec<(u64, Rc<F>)>,
}

/// A single-threaded set of listeners of type `F` (usually `dyn Fn(..)`).
pub struct EventEmitter<F: ?Sized> {
    inner: Rc<RefCell<Registry<F>>>,
}

impl<F: ?Sized> Clone for EventEmitter<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F: ?Sized> Default for EventEmitter<F> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }
}

impl<F: ?Sized> fmt::Debug for EventEmitter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<F: ?Sized> EventEmitter<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current listeners, in registration order.
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.inner
            .borrow()
            .slots
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: ?Sized + 'static> EventEmitter<F> {
    /// Register a listener. It stays registered until the guard is dropped.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(&self, listener: Rc<F>) -> Subscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.slots.push((id, listener));
            id
        };

        let weak: Weak<RefCell<Registry<F>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // Drop the listener outside the borrow; its captures may own other guards.
            let removed = {
                let mut registry = inner.borrow_mut();
                registry
                    .slots
                    .iter()
                    .position(|(slot, _)| *slot == id)
                    .map(|pos| registry.slots.remove(pos))
            };
            drop(removed);
        })
    }
}

/// Guard for a registered listener. Dropping it deregisters the listener.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap an arbitrary release action, e.g. removing a DOM or JS listener.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release now. Equivalent to dropping.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Listener = dyn Fn(u32);

    fn emit(emitter: &EventEmitter<Listener>, value: u32) {
        for listener in emitter.snapshot() {
            listener(value);
        }
    }

    #[test]
    fn test_drop_removes_listener() {
        let emitter: EventEmitter<Listener> = EventEmitter::new();
        let hits = Rc::new(Cell::new(0u32));

        let sub = {
            let hits = hits.clone();
            emitter.subscribe(Rc::new(move |v: u32| hits.set(hits.get() + v)))
        };
        emit(&emitter, 2);
        assert_eq!(emitter.len(), 1);

        drop(sub);
        emit(&emitter, 5);
        assert_eq!(hits.get(), 2);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_listener_can_release_itself_during_emit() {
        let emitter: EventEmitter<Listener> = EventEmitter::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0u32));

        let sub = {
            let slot = slot.clone();
            let hits = hits.clone();
            emitter.subscribe(Rc::new(move |_: u32| {
                hits.set(hits.get() + 1);
                let own = slot.borrow_mut().take();
                drop(own);
            }))
        };
        *slot.borrow_mut() = Some(sub);

        emit(&emitter, 1);
        emit(&emitter, 1);
        assert_eq!(hits.get(), 1);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_subscription_outliving_emitter_is_harmless() {
        let emitter: EventEmitter<Listener> = EventEmitter::new();
        let sub = emitter.subscribe(Rc::new(|_: u32| {}));
        drop(emitter);
        drop(sub);
    }

    #[test]
    fn test_custom_release_runs_once() {
        let released = Rc::new(Cell::new(0));
        let sub = {
            let released = released.clone();
            Subscription::new(move || released.set(released.get() + 1))
        };
        sub.cancel();
        assert_eq!(released.get(), 1);
    }
}
