// dom/mod.rs

//! The document root the theme is projected onto.
//!
//! Stylesheets select on the root's attributes, so only those attributes and
//! the root's inline custom properties are ever touched here.

pub mod applier;
pub mod watcher;

use log::*;
use std::collections::BTreeMap;
use std::fmt;

pub use applier::{ApplyOutcome, RootRepresentation, ThemeApplier};
pub use watcher::ThemeWatcher;

/// A change to one attribute of the root, as reported to observers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeMutation {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub type MutationHook = Box<dyn FnMut(&AttributeMutation)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Minimal surface of a document's root element
pub trait DocumentRoot {
    fn attribute(&self, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, name: &str, value: &str);
    fn remove_attribute(&mut self, name: &str);

    fn style_property(&self, name: &str) -> Option<&str>;
    fn style_property_names(&self) -> Vec<String>;
    fn set_style_property(&mut self, name: &str, value: &str);
    fn remove_style_property(&mut self, name: &str);

    /// Calls `hook` after every write to `attribute`, until disconnected.
    fn observe(&mut self, attribute: &str, hook: MutationHook) -> ObserverId;
    fn disconnect(&mut self, id: ObserverId);
}

struct Observer {
    id: ObserverId,
    attribute: String,
    hook: MutationHook,
}

/// In-memory root element
#[derive(Default)]
pub struct Element {
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    observers: Vec<Observer>,
    next_observer: u64,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn style(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, mutation: AttributeMutation) {
        for observer in self
            .observers
            .iter_mut()
            .filter(|o| o.attribute == mutation.name)
        {
            trace!("Notifying observer {:?} of {}", observer.id, mutation.name);
            (observer.hook)(&mutation);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("attributes", &self.attributes)
            .field("style", &self.style)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DocumentRoot for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let old_value = self.attributes.insert(name.to_string(), value.to_string());
        self.notify(AttributeMutation {
            name: name.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
    }

    fn remove_attribute(&mut self, name: &str) {
        if let Some(old_value) = self.attributes.remove(name) {
            self.notify(AttributeMutation {
                name: name.to_string(),
                old_value: Some(old_value),
                new_value: None,
            });
        }
    }

    fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    fn style_property_names(&self) -> Vec<String> {
        self.style.keys().cloned().collect()
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    fn remove_style_property(&mut self, name: &str) {
        self.style.remove(name);
    }

    fn observe(&mut self, attribute: &str, hook: MutationHook) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer {
            id,
            attribute: attribute.to_string(),
            hook,
        });
        id
    }

    fn disconnect(&mut self, id: ObserverId) {
        self.observers.retain(|o| o.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn should_notify_only_matching_attribute() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut root = Element::new();
        root.observe(
            "data-theme",
            Box::new(move |m: &AttributeMutation| sink.borrow_mut().push(m.clone())),
        );

        root.set_attribute("lang", "en");
        root.set_attribute("data-theme", "dark 2501221");
        root.set_attribute("data-theme", "light 2501222");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].old_value.as_deref(), Some("dark 2501221"));
        assert_eq!(seen[1].new_value.as_deref(), Some("light 2501222"));
    }

    #[test]
    fn should_stop_notifying_after_disconnect() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut root = Element::new();
        let id = root.observe("data-theme", Box::new(move |_| *sink.borrow_mut() += 1));

        root.set_attribute("data-theme", "dark a");
        root.disconnect(id);
        root.set_attribute("data-theme", "dark b");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(root.observer_count(), 0);
    }

    #[test]
    fn should_not_notify_when_removing_absent_attribute() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut root = Element::new();
        root.observe("data-theme", Box::new(move |_| *sink.borrow_mut() += 1));
        root.remove_attribute("data-theme");
        assert_eq!(*count.borrow(), 0);
    }
}
