//! Watch on the root's theme attributes

use log::*;
use std::cell::RefCell;
use std::rc::Rc;

use super::{AttributeMutation, DocumentRoot, ObserverId};

/// Observers registered on the root by [`ThemeWatcher::start`]
#[derive(Debug, Default)]
pub struct ThemeWatcher {
    observers: Option<Vec<ObserverId>>,
}

impl ThemeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watching(&self) -> bool {
        self.observers.is_some()
    }

    /// Registers `hook` for writes to any of `attributes`. Returns `false`
    /// without registering anything if already watching.
    pub fn start<R, F>(&mut self, root: &mut R, attributes: &[&str], hook: F) -> bool
    where
        R: DocumentRoot + ?Sized,
        F: FnMut(&AttributeMutation) + 'static,
    {
        if self.is_watching() {
            debug!("Theme watcher already running");
            return false;
        }
        let hook = Rc::new(RefCell::new(hook));
        let ids = attributes
            .iter()
            .map(|attribute| {
                let hook = Rc::clone(&hook);
                root.observe(
                    attribute,
                    Box::new(move |mutation: &AttributeMutation| {
                        // re-entrant notifications are dropped
                        if let Ok(mut hook) = hook.try_borrow_mut() {
                            (&mut *hook)(mutation)
                        }
                    }),
                )
            })
            .collect();
        self.observers = Some(ids);
        info!("Watching root attributes {attributes:?}");
        true
    }

    /// Removes every registered observer. Safe to call when not watching.
    pub fn stop<R: DocumentRoot + ?Sized>(&mut self, root: &mut R) {
        if let Some(ids) = self.observers.take() {
            for id in ids {
                root.disconnect(id);
            }
            info!("Stopped watching root attributes");
        }
    }
}
