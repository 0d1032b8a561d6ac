//! Two-way bindings and field lenses.
//!
//! # Responsibility
//! - Give child components read/write access to part of a store without
//!   owning the store.
//! - Compose lenses so nested fields (`user.address.street`) stay editable
//!   from the leaf.
//!
//! # Invariants
//! - A binding holds no state of its own; every read goes to the source.
//! - A derived write re-reads the parent right before writing back, so a
//!   sibling write made in between is never lost.
//! - One leaf write produces exactly one `set` on the root store.

use std::rc::Rc;

/// Functional accessor from an aggregate `S` to a component `T`.
pub struct Lens<S, T> {
    read: Rc<dyn Fn(&S) -> T>,
    write: Rc<dyn Fn(S, T) -> S>,
}

impl<S: 'static, T: 'static> Lens<S, T> {
    /// Builds a lens from a projection and a pure updater.
    pub fn new(read: impl Fn(&S) -> T + 'static, write: impl Fn(S, T) -> S + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    /// Builds a lens from a projection and an in-place field setter.
    pub fn field(read: impl Fn(&S) -> T + 'static, assign: impl Fn(&mut S, T) + 'static) -> Self {
        Self::new(read, move |mut whole, part| {
            assign(&mut whole, part);
            whole
        })
    }

    /// Reads the focused component.
    pub fn view(&self, whole: &S) -> T {
        (self.read)(whole)
    }

    /// Returns `whole` with the focused component replaced.
    pub fn replace(&self, whole: S, part: T) -> S {
        (self.write)(whole, part)
    }

    /// Focuses further into the component `T`.
    pub fn then<U: 'static>(&self, inner: Lens<T, U>) -> Lens<S, U> {
        let outer_view = Rc::clone(&self.read);
        let outer_read = Rc::clone(&self.read);
        let outer_write = Rc::clone(&self.write);
        let Lens {
            read: inner_read,
            write: inner_write,
        } = inner;
        Lens {
            read: Rc::new(move |whole: &S| inner_read(&outer_view(whole))),
            write: Rc::new(move |whole: S, leaf: U| {
                let part = outer_read(&whole);
                outer_write(whole, inner_write(part, leaf))
            }),
        }
    }
}

impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
            write: Rc::clone(&self.write),
        }
    }
}

/// Read/write accessor onto a value owned elsewhere.
pub struct Binding<T> {
    read: Rc<dyn Fn() -> T>,
    write: Rc<dyn Fn(T)>,
}

impl<T: 'static> Binding<T> {
    /// Wraps an arbitrary getter/setter pair.
    pub fn new(read: impl Fn() -> T + 'static, write: impl Fn(T) + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    /// Binding that always reads `value` and drops writes.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move || value.clone(), |_| {})
    }

    /// Reads the current value from the source.
    pub fn get(&self) -> T {
        (self.read)()
    }

    /// Writes through to the source.
    pub fn set(&self, value: T) {
        (self.write)(value)
    }

    /// Read-modify-write through the binding.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Child binding focused through `lens`.
    pub fn derive<U: 'static>(&self, lens: Lens<T, U>) -> Binding<U> {
        let parent_read = Rc::clone(&self.read);
        let parent = self.clone();
        let read_lens = lens.clone();
        Binding::new(
            move || read_lens.view(&parent_read()),
            move |part| {
                let current = parent.get();
                parent.set(lens.replace(current, part));
            },
        )
    }

    /// Shorthand for `derive(Lens::field(read, assign))`.
    pub fn field<U: 'static>(
        &self,
        read: impl Fn(&T) -> U + 'static,
        assign: impl Fn(&mut T, U) + 'static,
    ) -> Binding<U> {
        self.derive(Lens::field(read, assign))
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
            write: Rc::clone(&self.write),
        }
    }
}
