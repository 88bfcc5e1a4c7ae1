//! Named publish/subscribe hub with a wildcard channel.
//!
//! Components that produce notifications own an [`EventBus`] and expose `on` /
//! `off` by delegation. Listeners are registered under one or more event names,
//! or under the wildcard token [`WILDCARD`] to observe every emitted event.
//!
//! Membership is by listener identity: a [`Listener`] handle registered twice
//! under the same name is only stored (and invoked) once. Dispatch is
//! synchronous and runs in registration order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Event name that subscribes a listener to every event.
pub const WILDCARD: &str = "all";

/// A shareable event callback with identity.
///
/// Cloning a `Listener` yields a handle to the same callback, so the clone can
/// later be passed to [`EventBus::off`]. Two listeners built from separate
/// [`Listener::new`] calls are always distinct, even if the closures are equal.
pub struct Listener<E> {
    callback: Rc<dyn Fn(&E)>,
}

impl<E> Listener<E> {
    /// Wraps a closure into a listener handle.
    pub fn new(callback: impl Fn(&E) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Returns `true` if both handles refer to the same callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.callback).cast::<()>(),
            Rc::as_ptr(&other.callback).cast::<()>(),
        )
    }

    fn call(&self, payload: &E) {
        (self.callback)(payload);
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Synchronous event hub carrying payloads of type `E`.
///
/// All methods take `&self`; listeners may register or unregister listeners
/// (including themselves) while an emit is running. Such changes take effect
/// from the next emit on.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use zmarks::events::{EventBus, Listener};
///
/// let bus: EventBus<u32> = EventBus::new();
/// let total = Rc::new(Cell::new(0));
///
/// let sink = Rc::clone(&total);
/// let listener = Listener::new(move |n: &u32| sink.set(sink.get() + n));
///
/// bus.on("add", &listener);
/// bus.on("add", &listener);
/// bus.emit("add", &5);
/// assert_eq!(total.get(), 5);
///
/// bus.off("add", &listener);
/// bus.emit("add", &5);
/// assert_eq!(total.get(), 5);
/// ```
pub struct EventBus<E> {
    named: RefCell<HashMap<String, Vec<Listener<E>>>>,
    wildcard: RefCell<Vec<Listener<E>>>,
}

impl<E> EventBus<E> {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            named: RefCell::new(HashMap::new()),
            wildcard: RefCell::new(Vec::new()),
        }
    }

    /// Registers `listener` under every whitespace-separated name in `names`.
    ///
    /// The token [`WILDCARD`] registers it on the wildcard channel instead.
    /// Registering a listener that is already present under a name is a no-op.
    pub fn on(&self, names: &str, listener: &Listener<E>) {
        for name in names.split_whitespace() {
            if name == WILDCARD {
                let mut wildcard = self.wildcard.borrow_mut();
                if !wildcard.iter().any(|l| l.same_as(listener)) {
                    wildcard.push(listener.clone());
                }
            } else {
                let mut named = self.named.borrow_mut();
                let listeners = named.entry(name.to_string()).or_default();
                if !listeners.iter().any(|l| l.same_as(listener)) {
                    listeners.push(listener.clone());
                }
            }
        }
    }

    /// Unregisters `listener` from every whitespace-separated name in `names`.
    ///
    /// Names the listener is not registered under are skipped silently.
    pub fn off(&self, names: &str, listener: &Listener<E>) {
        for name in names.split_whitespace() {
            if name == WILDCARD {
                self.wildcard.borrow_mut().retain(|l| !l.same_as(listener));
            } else if let Some(listeners) = self.named.borrow_mut().get_mut(name) {
                listeners.retain(|l| !l.same_as(listener));
            }
        }
    }

    /// Dispatches `payload` to the listeners of each name in `names`, then to
    /// every wildcard listener.
    ///
    /// Wildcard listeners run once per call, after all specific listeners. The
    /// wildcard token itself is never dispatched as a specific event.
    pub fn emit(&self, names: &str, payload: &E) {
        let mut targets: Vec<Listener<E>> = {
            let named = self.named.borrow();
            names
                .split_whitespace()
                .filter(|name| *name != WILDCARD)
                .filter_map(|name| named.get(name))
                .flat_map(|listeners| listeners.iter().cloned())
                .collect()
        };
        targets.extend(self.wildcard.borrow().iter().cloned());

        for listener in &targets {
            listener.call(payload);
        }
    }

    /// Number of listeners registered under `name` ([`WILDCARD`] included).
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        if name == WILDCARD {
            self.wildcard.borrow().len()
        } else {
            self.named.borrow().get(name).map_or(0, Vec::len)
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named: Vec<(String, usize)> = self
            .named
            .borrow()
            .iter()
            .map(|(name, listeners)| (name.clone(), listeners.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("named", &named)
            .field("wildcard", &self.wildcard.borrow().len())
            .finish()
    }
}
