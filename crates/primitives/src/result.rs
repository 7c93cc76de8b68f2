/// The outcome of replaying chain history into a current state.
///
/// `is_complete` starts out `true` and can only be downgraded: once a part of the history could
/// not be interpreted, the result stays flagged as a best-effort snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionResult<T> {
    items: T,
    is_complete: bool,
}

impl<T> ReconstructionResult<T> {
    /// Returns a complete result holding the provided items.
    pub const fn new(items: T) -> Self {
        Self { items, is_complete: true }
    }

    /// Flags the result as possibly incomplete. There is no way back.
    pub fn mark_incomplete(&mut self) {
        self.is_complete = false;
    }

    /// Returns the reconstructed items.
    pub const fn items(&self) -> &T {
        &self.items
    }

    /// Returns false if part of the history could not be interpreted.
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Returns the items and the completeness flag.
    pub fn into_parts(self) -> (T, bool) {
        (self.items, self.is_complete)
    }

    /// Maps the items, keeping the completeness flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReconstructionResult<U> {
        ReconstructionResult { items: f(self.items), is_complete: self.is_complete }
    }
}
