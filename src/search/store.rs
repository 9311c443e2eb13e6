use std::fmt;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Observable value with explicit subscribe/notify semantics.
///
/// Listeners run synchronously on [`Store::set`], and only when the new value
/// differs from the stored one.
pub struct Store<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T: PartialEq> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value, notifying listeners if it changed. Returns whether
    /// it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl<T: Default + PartialEq> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_see_each_change_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(0);
        let sink = Rc::clone(&seen);
        store.subscribe(move |value| sink.borrow_mut().push(*value));

        assert!(store.set(1));
        assert!(!store.set(1));
        assert!(store.set(2));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn unsubscribed_listeners_stop_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut store = Store::new(String::new());
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.set("a".to_string());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("b".to_string());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.get(), "b");
    }
}
