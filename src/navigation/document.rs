use std::sync::{PoisonError, RwLock};

use super::guard::NavigationTicket;

#[derive(Debug, Default)]
struct Stamped {
    ticket: Option<NavigationTicket>,
    text: String,
}

/// The displayed window/tab title, written by the title guard.
///
/// Each write is stamped with the ticket of the navigation that made it; a
/// write from an older navigation than the last writer is dropped.
#[derive(Debug, Default)]
pub struct DocumentTitle {
    title: RwLock<Stamped>,
}

impl DocumentTitle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `title` on behalf of `ticket`. Returns `false` when a newer
    /// navigation already wrote the title.
    pub fn set_for(&self, ticket: NavigationTicket, title: String) -> bool {
        let mut current = self.title.write().unwrap_or_else(PoisonError::into_inner);
        if current.ticket.is_some_and(|last| last > ticket) {
            return false;
        }
        current.ticket = Some(ticket);
        current.text = title;
        true
    }

    pub fn get(&self) -> String {
        self.title
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .text
            .clone()
    }
}
