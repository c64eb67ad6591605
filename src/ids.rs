use std::fmt::{Display, Formatter};

/// Identifier attached to a single dispatch.
///
/// Every call to [`Dispatcher::invoke`](crate::dispatcher::Dispatcher::invoke) gets a
/// fresh id so log lines from one dispatch can be correlated. Also used to mint
/// multipart boundaries.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct InvocationId(ulid::Ulid);

impl InvocationId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for InvocationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
