use std::collections::HashMap;
use std::hash::Hash;

/// A version-independent packet identifier used as the dispatch key,
/// alongside protocol state. Protocol adapters map their per-version wire
/// ids onto these; handlers never see a wire id.
pub type AgnosticId = u32;

/// Opaque handle returned by `register`, usable to `unregister` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Entry<P> {
    id: HandlerId,
    callback: Box<dyn FnMut(&P) + Send>,
}

/// Routes a decoded inbound packet to every handler registered for its
/// `(state, agnostic_id)` key, in registration order. Generic over the
/// connection-state enum `S` and the packet payload type `P` so it does not
/// need to depend on any particular protocol-version crate.
///
/// Handlers must not block (§5): the dispatcher calls them synchronously on
/// whatever thread drives the connection's read pump, one packet fully
/// dispatched before the next is read.
pub struct PacketDispatcher<S, P> {
    handlers: HashMap<(S, AgnosticId), Vec<Entry<P>>>,
    next_id: u64,
}

impl<S, P> PacketDispatcher<S, P>
where
    S: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a handler for `(state, agnostic_id)`. Returns a `HandlerId`
    /// that can later be passed to `unregister`.
    pub fn register(
        &mut self,
        state: S,
        agnostic_id: AgnosticId,
        callback: impl FnMut(&P) + Send + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry((state, agnostic_id))
            .or_default()
            .push(Entry {
                id,
                callback: Box::new(callback),
            });
        id
    }

    /// Remove a previously registered handler. No-op if it's already gone.
    pub fn unregister(&mut self, id: HandlerId) {
        for entries in self.handlers.values_mut() {
            entries.retain(|e| e.id != id);
        }
    }

    /// Dispatch a decoded packet to every handler registered for this key,
    /// in the order they were registered. Unknown keys dispatch to nobody
    /// (not an error — see `UnknownInboundPacket` policy in the registry).
    pub fn dispatch(&mut self, state: S, agnostic_id: AgnosticId, packet: &P) {
        if let Some(entries) = self.handlers.get_mut(&(state, agnostic_id)) {
            for entry in entries.iter_mut() {
                (entry.callback)(packet);
            }
        }
    }

    pub fn handler_count(&self, state: S, agnostic_id: AgnosticId) -> usize {
        self.handlers
            .get(&(state, agnostic_id))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl<S, P> Default for PacketDispatcher<S, P>
where
    S: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestState {
        Play,
    }

    #[test]
    fn test_dispatch_order_matches_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher: PacketDispatcher<TestState, i32> = PacketDispatcher::new();

        let log_a = log.clone();
        dispatcher.register(TestState::Play, 1, move |p: &i32| {
            log_a.lock().unwrap().push(("a", *p));
        });
        let log_b = log.clone();
        dispatcher.register(TestState::Play, 1, move |p: &i32| {
            log_b.lock().unwrap().push(("b", *p));
        });

        dispatcher.dispatch(TestState::Play, 1, &42);
        dispatcher.dispatch(TestState::Play, 1, &43);

        let entries = log.lock().unwrap().clone();
        assert_eq!(entries, vec![("a", 42), ("b", 42), ("a", 43), ("b", 43)]);
    }

    #[test]
    fn test_unknown_key_dispatches_to_nobody() {
        let mut dispatcher: PacketDispatcher<TestState, i32> = PacketDispatcher::new();
        dispatcher.dispatch(TestState::Play, 99, &1);
    }

    #[test]
    fn test_unregister() {
        let count = Arc::new(Mutex::new(0));
        let mut dispatcher: PacketDispatcher<TestState, i32> = PacketDispatcher::new();
        let count_clone = count.clone();
        let id = dispatcher.register(TestState::Play, 1, move |_: &i32| {
            *count_clone.lock().unwrap() += 1;
        });
        dispatcher.dispatch(TestState::Play, 1, &0);
        dispatcher.unregister(id);
        dispatcher.dispatch(TestState::Play, 1, &0);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut dispatcher: PacketDispatcher<TestState, i32> = PacketDispatcher::new();
        assert_eq!(dispatcher.handler_count(TestState::Play, 1), 0);
        dispatcher.register(TestState::Play, 1, |_: &i32| {});
        dispatcher.register(TestState::Play, 2, |_: &i32| {});
        assert_eq!(dispatcher.handler_count(TestState::Play, 1), 1);
        assert_eq!(dispatcher.handler_count(TestState::Play, 2), 1);
    }
}
