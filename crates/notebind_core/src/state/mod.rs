//! Reactive state primitives shared by every view model in the crate.
//!
//! # Responsibility
//! - `Store`: owning observable container with explicit subscriber lists.
//! - `Binding`/`Lens`: non-owning read/write access into a store field.
//! - `Scope`: explicit provide/consume registry for subtree-wide state.
//!
//! # Invariants
//! - All primitives are single-threaded; notification is synchronous.

pub mod binding;
pub mod context;
pub mod store;

pub use binding::{Binding, Lens};
pub use context::Scope;
pub use store::{Store, Subscription, SubscriptionId, WeakStore};
