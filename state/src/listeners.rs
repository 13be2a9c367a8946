//! Change notification for hosts that re-render on state changes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

impl Listeners {
    pub(crate) fn insert(
        this: &Rc<RefCell<Self>>,
        listener: impl Fn() + 'static,
    ) -> Subscription {
        let mut listeners = this.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Rc::new(listener));

        Subscription {
            id,
            listeners: Rc::downgrade(this),
        }
    }

    /// Call every registered listener once.
    ///
    /// The registry is not borrowed while listeners run, so a listener may
    /// subscribe or drop its own subscription.
    pub(crate) fn notify(this: &RefCell<Self>) {
        let snapshot: Vec<Listener> =
            this.borrow().entries.values().cloned().collect();
        tracing::trace!("Notifying {} listener(s)", snapshot.len());
        for listener in snapshot {
            listener();
        }
    }
}

/// Keeps a listener registered until dropped.
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.remove(&self.id);
        }
    }
}
