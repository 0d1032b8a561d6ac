//! Observable value container.
//!
//! # Responsibility
//! - Own exactly one value and hand out cheap shared handles to it.
//! - Notify subscribers synchronously after every mutation.
//!
//! # Invariants
//! - Every `set`/`update` invokes each subscriber registered at call time
//!   exactly once, in subscription order, before returning.
//! - Subscribers observe a snapshot taken right after the mutation, so they may
//!   read or write the same store without borrow conflicts.
//! - A write from inside a callback supersedes the running cycle: the nested
//!   cycle notifies everyone with the newer value and the outer cycle stops,
//!   so the last value each subscriber sees is the stored one.
//! - Single-threaded: handles are `!Send`.

use super::binding::Binding;
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Identifier of one subscription within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StoreInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_subscription: Cell<u64>,
    version: Cell<u64>,
}

/// Observable container for a single value.
///
/// Cloning a `Store` clones the handle; all clones share one value and one
/// subscriber list.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

/// Non-owning handle to a [`Store`], used by editors that must not keep a
/// record alive after its owner dropped it.
pub struct WeakStore<T> {
    inner: Weak<StoreInner<T>>,
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle keeps the subscription active; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<dyn SubscriberRegistry>,
}

trait SubscriberRegistry {
    fn remove_subscriber(&self, id: SubscriptionId) -> bool;
}

impl<T> SubscriberRegistry for StoreInner<T> {
    fn remove_subscriber(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(current, _)| *current != id);
        subscribers.len() != before
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Creates a store owning `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
                version: Cell::new(0),
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and runs one notification cycle.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.bump_version();
        self.notify();
    }

    /// Mutates the value in place and runs one notification cycle.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut value = self.inner.value.borrow_mut();
            f(&mut value);
        }
        self.bump_version();
        self.notify();
    }

    /// Registers `callback` for every subsequent mutation.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let registry: Rc<dyn SubscriberRegistry> = self.inner.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    /// Removes a subscription. Returns `false` when it was already gone or
    /// belongs to another store.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let Some(registry) = subscription.registry.upgrade() else {
            return false;
        };
        let same_store =
            Rc::as_ptr(&registry) as *const u8 == Rc::as_ptr(&self.inner) as *const u8;
        if !same_store {
            return false;
        }
        registry.remove_subscriber(subscription.id)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Two-way binding onto the whole value.
    pub fn binding(&self) -> Binding<T> {
        let reader = self.clone();
        let writer = self.clone();
        Binding::new(move || reader.get(), move |value| writer.set(value))
    }

    /// Creates a non-owning handle.
    pub fn downgrade(&self) -> WeakStore<T> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn bump_version(&self) {
        self.inner.version.set(self.inner.version.get().wrapping_add(1));
    }

    fn notify(&self) {
        // Snapshot both lists so callbacks can subscribe, unsubscribe or set.
        let version = self.inner.version.get();
        let snapshot = self.get();
        let subscribers = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect::<Vec<_>>();
        for callback in subscribers {
            callback(&snapshot);
            // A nested write already notified everyone with the newer value.
            if self.inner.version.get() != version {
                break;
            }
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Debug> Debug for Store<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> WeakStore<T> {
    /// Returns the store while its owner still holds it.
    pub fn upgrade(&self) -> Option<Store<T>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<T> Clone for WeakStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl Subscription {
    /// Removes this subscription from its store. No-op once the store is gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove_subscriber(self.id),
            None => false,
        }
    }

    /// Identifier of this subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
