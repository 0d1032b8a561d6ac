//! Scope-keyed shared state registry.
//!
//! # Responsibility
//! - Make a store available to a whole subtree without threading it through
//!   every constructor.
//! - Resolve the nearest provider by walking up the scope tree.
//!
//! # Invariants
//! - One store instance per type per scope; every descendant resolves the
//!   same instance.
//! - Consuming a type nobody provided is a programmer error and panics.

use super::store::Store;
use log::error;
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct ScopeNode {
    parent: Option<Rc<ScopeNode>>,
    provided: RefCell<HashMap<TypeId, Box<dyn Any>>>,
    depth: usize,
}

/// One node of the component tree that can provide shared stores.
#[derive(Clone)]
pub struct Scope {
    node: Rc<ScopeNode>,
}

impl Scope {
    /// Creates a scope with no parent.
    pub fn root() -> Self {
        Self {
            node: Rc::new(ScopeNode {
                parent: None,
                provided: RefCell::new(HashMap::new()),
                depth: 0,
            }),
        }
    }

    /// Creates a descendant scope that inherits every provider above it.
    pub fn child(&self) -> Self {
        Self {
            node: Rc::new(ScopeNode {
                parent: Some(Rc::clone(&self.node)),
                provided: RefCell::new(HashMap::new()),
                depth: self.node.depth + 1,
            }),
        }
    }

    /// Distance from the root scope.
    pub fn depth(&self) -> usize {
        self.node.depth
    }

    /// Makes `store` visible to this scope and all of its descendants.
    ///
    /// A second provision of the same type at the same scope replaces the first.
    pub fn provide<T: Clone + 'static>(&self, store: Store<T>) {
        self.node
            .provided
            .borrow_mut()
            .insert(TypeId::of::<Store<T>>(), Box::new(store));
    }

    /// Resolves the nearest provided `Store<T>`, if any.
    pub fn try_consume<T: Clone + 'static>(&self) -> Option<Store<T>> {
        let key = TypeId::of::<Store<T>>();
        let mut current = Some(&self.node);
        while let Some(node) = current {
            if let Some(entry) = node.provided.borrow().get(&key) {
                return entry.downcast_ref::<Store<T>>().cloned();
            }
            current = node.parent.as_ref();
        }
        None
    }

    /// Resolves the nearest provided `Store<T>`.
    ///
    /// # Panics
    /// Panics when no enclosing scope provides `Store<T>`.
    pub fn consume<T: Clone + 'static>(&self) -> Store<T> {
        match self.try_consume::<T>() {
            Some(store) => store,
            None => {
                error!(
                    "event=context_missing module=state status=error type={} depth={}",
                    type_name::<T>(),
                    self.depth()
                );
                panic!(
                    "no Store<{}> provided in any enclosing scope",
                    type_name::<T>()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scope;
    use crate::state::Store;

    #[derive(Clone, Debug, PartialEq)]
    struct Session {
        user: String,
    }

    #[test]
    fn siblings_share_one_instance() {
        let root = Scope::root();
        root.provide(Store::new(Session {
            user: "guest".to_string(),
        }));

        let left = root.child().child();
        let right = root.child();

        let writer = left.consume::<Session>();
        writer.update(|s| s.user = "john".to_string());

        let reader = right.consume::<Session>();
        assert!(reader.ptr_eq(&writer));
        assert_eq!(reader.get().user, "john");
    }

    #[test]
    fn nearest_provider_wins() {
        let root = Scope::root();
        root.provide(Store::new(1_u32));
        let inner = root.child();
        inner.provide(Store::new(2_u32));
        let leaf = inner.child();

        assert_eq!(leaf.consume::<u32>().get(), 2);
        assert_eq!(root.child().consume::<u32>().get(), 1);
    }

    #[test]
    fn try_consume_reports_absence() {
        let scope = Scope::root().child();
        assert!(scope.try_consume::<Session>().is_none());
    }

    #[test]
    #[should_panic(expected = "no Store<")]
    fn consume_without_provider_panics() {
        let scope = Scope::root();
        let _ = scope.consume::<Session>();
    }
}
