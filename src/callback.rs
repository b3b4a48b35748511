//! Host callbacks.
//!
//! The labeler reports saves, exits and sample removal to its host through
//! optional side-effect callbacks. Instead of repeating
//! `Option<Box<dyn FnMut(T)>>` everywhere, those are wrapped in [`Callback`].

use std::fmt;

use crate::model::Annotation;
use crate::navigation::ExitReason;

/// An optional side-effect callback taking a value.
pub struct Callback<T> {
    f: Option<Box<dyn FnMut(T)>>,
}

impl<T> Callback<T> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns true if a handler was registered and ran.
    pub fn call(&mut self, value: T) -> bool {
        match self.f.as_mut() {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// Receives `(sample index, output)` whenever a sample is committed.
pub type SaveCallback = Callback<(usize, Option<Annotation>)>;

/// Receives the reason when the labeler asks to leave the session.
/// `None` means the user finished on purpose.
pub type ExitCallback = Callback<Option<ExitReason>>;

/// Fires when the user asks to drop the current sample.
pub type RemoveSampleCallback = Callback<()>;
