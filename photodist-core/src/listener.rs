//! Synchronous change notification

use std::fmt;

/// Receives a call every time the geometry changes
pub trait GeometryListener {
    fn geometry_changed(&mut self);
}

impl<F> GeometryListener for F
where
    F: FnMut(),
{
    fn geometry_changed(&mut self) {
        self()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners, notified in subscription order
#[derive(Default)]
pub struct ListenerList {
    listeners: Vec<(ListenerId, Box<dyn GeometryListener>)>,
    next_id: u64,
}

impl ListenerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: GeometryListener + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.geometry_changed();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
