//! Binding exercises: one type per pattern.
//!
//! - [`Counter`]: state owned and mutated locally.
//! - [`TogglePair`]/[`ToggleChild`]: parent owns a flag, child edits it
//!   through a binding.
//! - [`UserViewModel`]/[`UserNameView`]: an observed view model whose view
//!   re-derives its text on every change.
//! - [`LightBulb`]: owned view model toggled by its own view.
//! - [`UserProfile`]: nested struct edited at the leaf through composed lenses.

use crate::state::{Binding, Lens, Store, Subscription};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Tap counter with purely local state.
pub struct Counter {
    count: Store<u32>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            count: Store::new(0),
        }
    }

    pub fn tap(&self) {
        self.count.update(|count| *count += 1);
    }

    pub fn label(&self) -> String {
        format!("Count: {}", self.count.get())
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent that owns the `is_on` flag.
pub struct TogglePair {
    is_on: Store<bool>,
}

/// Child that edits the parent's flag without owning it.
pub struct ToggleChild {
    is_on: Binding<bool>,
}

impl TogglePair {
    pub fn new() -> Self {
        Self {
            is_on: Store::new(false),
        }
    }

    /// Hands a binding to the child.
    pub fn child(&self) -> ToggleChild {
        ToggleChild {
            is_on: self.is_on.binding(),
        }
    }

    pub fn label(&self) -> String {
        format!("isOn: {}", self.is_on.get())
    }
}

impl Default for TogglePair {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleChild {
    pub fn toggle(&self) {
        self.is_on.update(|on| *on = !*on);
    }

    pub fn set(&self, on: bool) {
        self.is_on.set(on);
    }

    pub fn is_on(&self) -> bool {
        self.is_on.get()
    }
}

/// Observable user view model.
#[derive(Clone)]
pub struct UserViewModel {
    pub id: Uuid,
    user_name: Store<String>,
}

impl UserViewModel {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: Store::new(user_name.into()),
        }
    }

    pub fn user_name(&self) -> String {
        self.user_name.get()
    }

    /// Text field binding.
    pub fn user_name_binding(&self) -> Binding<String> {
        self.user_name.binding()
    }

    pub fn store(&self) -> &Store<String> {
        &self.user_name
    }
}

/// View that observes a [`UserViewModel`] it does not own.
pub struct UserNameView {
    rendered: Rc<RefCell<String>>,
    renders: Rc<RefCell<usize>>,
    subscription: Option<Subscription>,
}

impl UserNameView {
    /// Renders once, then re-renders whenever the view model changes.
    pub fn observe(view_model: &UserViewModel) -> Self {
        let rendered = Rc::new(RefCell::new(render_user_name(&view_model.user_name())));
        let renders = Rc::new(RefCell::new(1));
        let target = Rc::clone(&rendered);
        let counter = Rc::clone(&renders);
        let subscription = view_model.store().subscribe(move |name| {
            *target.borrow_mut() = render_user_name(name);
            *counter.borrow_mut() += 1;
        });
        Self {
            rendered,
            renders,
            subscription: Some(subscription),
        }
    }

    pub fn text(&self) -> String {
        self.rendered.borrow().clone()
    }

    pub fn render_count(&self) -> usize {
        *self.renders.borrow()
    }

    /// Stops observing; the text freezes at its last value.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

fn render_user_name(name: &str) -> String {
    format!("userName: {name}")
}

/// Light bulb view model owned by its view.
pub struct LightBulb {
    pub id: Uuid,
    is_on: Store<bool>,
}

impl LightBulb {
    /// Bulbs always start switched off.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            is_on: Store::new(false),
        }
    }

    pub fn toggle(&self) {
        self.is_on.update(|on| *on = !*on);
    }

    pub fn label(&self) -> String {
        format!("isOn: {}", self.is_on.get())
    }
}

impl Default for LightBulb {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub name: String,
    pub address: Address,
}

/// Root owner of a `User`; children edit nested fields through lenses.
pub struct UserProfile {
    user: Store<User>,
}

impl UserProfile {
    pub fn new(user: User) -> Self {
        Self {
            user: Store::new(user),
        }
    }

    pub fn user(&self) -> &Store<User> {
        &self.user
    }

    pub fn address_lens() -> Lens<User, Address> {
        Lens::field(|user: &User| user.address.clone(), |user, address| {
            user.address = address
        })
    }

    pub fn street_lens() -> Lens<Address, String> {
        Lens::field(|address: &Address| address.street.clone(), |address, street| {
            address.street = street
        })
    }

    /// Binding for an address editor that never sees the whole user.
    pub fn address(&self) -> Binding<Address> {
        self.user.binding().derive(Self::address_lens())
    }

    /// Binding for the street field, two lenses deep.
    pub fn street(&self) -> Binding<String> {
        self.address().derive(Self::street_lens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increments_locally() {
        let counter = Counter::new();
        counter.tap();
        counter.tap();
        assert_eq!(counter.label(), "Count: 2");
    }

    #[test]
    fn child_toggle_writes_parent_state() {
        let parent = TogglePair::new();
        let child = parent.child();
        child.toggle();
        assert_eq!(parent.label(), "isOn: true");
        child.set(false);
        assert_eq!(parent.label(), "isOn: false");
    }

    #[test]
    fn observed_view_rerenders_on_text_field_edit() {
        let view_model = UserViewModel::new("John");
        let mut view = UserNameView::observe(&view_model);
        assert_eq!(view.text(), "userName: John");

        view_model.user_name_binding().set("Jane".to_string());
        assert_eq!(view.text(), "userName: Jane");
        assert_eq!(view.render_count(), 2);

        view.detach();
        view_model.user_name_binding().set("Jim".to_string());
        assert_eq!(view.text(), "userName: Jane");
        assert_eq!(view_model.user_name(), "Jim");
    }

    #[test]
    fn light_bulb_starts_off_and_toggles() {
        let bulb = LightBulb::new();
        assert_eq!(bulb.label(), "isOn: false");
        bulb.toggle();
        assert_eq!(bulb.label(), "isOn: true");
    }

    #[test]
    fn street_edit_reaches_root_with_one_notification() {
        let profile = UserProfile::new(User {
            name: "John".to_string(),
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
            },
        });
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        let _ = profile.user().subscribe(move |_| *counter.borrow_mut() += 1);

        profile.street().set("742 Evergreen Terrace".to_string());

        assert_eq!(*notifications.borrow(), 1);
        assert_eq!(profile.user().get().address.street, "742 Evergreen Terrace");
        assert_eq!(profile.address().get().city, "Springfield");
    }
}
