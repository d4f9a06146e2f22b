use std::sync::atomic::{AtomicU64, Ordering};

/// Latest-wins guard for overlapping fetches of the same resource.
///
/// Every fetch takes a [`Ticket`] before it starts. When it completes it
/// applies its result only if no newer ticket has been issued since.
#[derive(Debug, Default)]
pub struct Supersede {
    generation: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Supersede {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket, superseding all earlier ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}
