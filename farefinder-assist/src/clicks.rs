use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use farefinder_core::FieldId;

use crate::lock;

/// A pointer interaction somewhere on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// The autocomplete field container the pointer landed in, if any.
    pub container: Option<FieldId>,
}

impl PointerEvent {
    pub fn inside(field: FieldId) -> Self {
        Self { container: Some(field) }
    }

    pub fn outside() -> Self {
        Self { container: None }
    }

    pub fn is_within(&self, field: &FieldId) -> bool {
        self.container.as_ref() == Some(field)
    }
}

type Handler = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    active: BTreeMap<u64, Handler>,
}

/// Document-level click dispatch with owned subscriptions.
#[derive(Clone, Default)]
pub struct ClickHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl ClickHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> ClickSubscription
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.active.insert(id, Arc::new(handler));

        ClickSubscription {
            id,
            hub: Arc::downgrade(&self.listeners),
            attached: true,
        }
    }

    /// Deliver `event` to every listener attached when dispatch starts and
    /// still attached when its turn comes. Returns how many were invoked.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let snapshot: Vec<(u64, Handler)> = lock(&self.listeners)
            .active
            .iter()
            .map(|(id, handler)| (*id, Arc::clone(handler)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in snapshot {
            // Handlers run unlocked so they may detach themselves or others.
            if !lock(&self.listeners).active.contains_key(&id) {
                continue;
            }
            handler(event);
            invoked += 1;
        }
        invoked
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).active.len()
    }
}

/// Handle to one attached listener. Detaches on drop.
pub struct ClickSubscription {
    id: u64,
    hub: Weak<Mutex<Listeners>>,
    attached: bool,
}

impl ClickSubscription {
    /// Remove the listener. Returns `false` if it was already detached.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.attached = false;
        match self.hub.upgrade() {
            Some(listeners) => lock(&listeners).active.remove(&self.id).is_some(),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}
