//! Screen activation stack.
//!
//! Every push creates a new activation with a fresh [`ActivationId`]; the
//! entry it carries is never replaced in place. Popping drops the top
//! activation and exposes the previous one exactly as it was left.

use crate::model::ListInstanceParams;
use std::fmt;
use tracing::debug;

/// Identity of one activation on the stack. Never reused within a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(u64);

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a push leads, together with the payload captured at transition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ListInstance(Box<ListInstanceParams>),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::ListInstance(_) => "ListInstance",
        }
    }
}

/// One live entry on the stack.
#[derive(Debug)]
pub struct Activation<T> {
    pub id: ActivationId,
    pub entry: T,
}

/// Ordered stack of activations. The last element is the visible screen.
#[derive(Debug)]
pub struct NavigationStack<T> {
    activations: Vec<Activation<T>>,
    next_id: u64,
}

impl<T> NavigationStack<T> {
    /// Create a stack holding only the root entry.
    pub fn new(root: T) -> Self {
        let mut stack = Self {
            activations: Vec::new(),
            next_id: 0,
        };
        stack.push(root);
        stack
    }

    /// Append a new activation and make it the top.
    pub fn push(&mut self, entry: T) -> ActivationId {
        let id = ActivationId(self.next_id);
        self.next_id += 1;
        self.activations.push(Activation { id, entry });
        debug!("Pushed activation {} (depth {})", id, self.activations.len());
        id
    }

    /// Remove the top activation. The root is never popped.
    pub fn pop(&mut self) -> Option<Activation<T>> {
        if self.activations.len() <= 1 {
            return None;
        }
        let popped = self.activations.pop();
        if let Some(ref activation) = popped {
            debug!(
                "Popped activation {} (depth {})",
                activation.id,
                self.activations.len()
            );
        }
        popped
    }

    pub fn top(&self) -> &Activation<T> {
        // The root is never removed, so the stack is never empty.
        &self.activations[self.activations.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut Activation<T> {
        let last = self.activations.len() - 1;
        &mut self.activations[last]
    }

    pub fn get_mut(&mut self, id: ActivationId) -> Option<&mut Activation<T>> {
        self.activations.iter_mut().find(|a| a.id == id)
    }

    pub fn contains(&self, id: ActivationId) -> bool {
        self.activations.iter().any(|a| a.id == id)
    }

    pub fn depth(&self) -> usize {
        self.activations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activation<T>> {
        self.activations.iter()
    }
}
