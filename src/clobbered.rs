//! Local state that an external value can override.
//!
//! The host may own the value (for example the current sample index). While
//! the host's value stays the same, local updates stick; as soon as the host
//! supplies a different value it replaces whatever was set locally.

/// A locally mutable value with an optional host override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClobberedState<T> {
    external: Option<T>,
    value: T,
}

impl<T: Clone + PartialEq> ClobberedState<T> {
    /// Start from the external value if present, otherwise `default`.
    pub fn new(external: Option<T>, default: T) -> Self {
        let value = external.clone().unwrap_or(default);
        Self { external, value }
    }

    /// Feed the host's current value.
    ///
    /// Returns true if the external value changed and was adopted. Clearing
    /// the external value hands ownership back to local state without
    /// changing the current value.
    pub fn sync(&mut self, external: Option<T>) -> bool {
        if external == self.external {
            return false;
        }
        self.external = external;
        match &self.external {
            Some(value) => {
                self.value = value.clone();
                true
            }
            None => false,
        }
    }

    /// Set the value locally.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Last external value seen.
    pub fn external(&self) -> Option<&T> {
        self.external.as_ref()
    }
}
