//! Latest-wins coordination for overlapping list fetches
//!
//! A view that re-fetches on every keystroke can have several requests in
//! flight at once, and responses are free to arrive out of order. Instead
//! of cancelling the old request before starting a new one, every fetch
//! gets a ticket from a monotonically increasing generation counter and
//! only the ticket matching the latest generation may publish its results.
//! A slow response for a superseded fetch is simply dropped.

use crate::client::{ApiClient, ApiError, ListOptions};
use crate::filter;
use crate::models::Entity;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of having started a fetch; required to publish its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// One view's window onto a resource collection: the last published result
/// set plus the generation counter guarding it.
#[derive(Debug)]
pub struct ListSession<E> {
    latest: AtomicU64,
    published: Mutex<Vec<E>>,
}

impl<E: Entity> ListSession<E> {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Start a new fetch, invalidating every ticket handed out before.
    pub fn begin(&self) -> FetchTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket { generation }
    }

    /// Install `items` as the visible result set, unless a newer fetch has
    /// started since `ticket` was issued. Returns whether the results were
    /// accepted.
    pub fn publish(&self, ticket: FetchTicket, items: Vec<E>) -> bool {
        // The generation check and the store must happen under the same
        // lock: checked outside it, a stale publisher could pass the check
        // and then overwrite results a newer fetch published in between.
        let mut published = self.published.lock();
        if ticket.generation != self.latest.load(Ordering::SeqCst) {
            tracing::debug!(
                generation = ticket.generation,
                "dropping results of superseded fetch"
            );
            return false;
        }
        *published = items;
        true
    }

    /// The last successfully published result set.
    pub fn current(&self) -> Vec<E> {
        self.published.lock().clone()
    }

    /// Fetch from the server and publish the results. On failure the
    /// previously published results stay visible and the error is returned
    /// to the caller.
    pub async fn refresh(
        &self,
        client: &ApiClient,
        filter: &E::Filter,
        options: &ListOptions,
    ) -> Result<bool, ApiError> {
        let ticket = self.begin();
        let items = client.list::<E>(filter, options).await?;
        Ok(self.publish(ticket, items))
    }

    /// Narrow the published results in memory without a new request.
    pub fn refine(&self, filter: &E::Filter) -> Vec<E> {
        filter::apply(&self.current(), filter)
    }
}

impl<E: Entity> Default for ListSession<E> {
    fn default() -> Self {
        Self::new()
    }
}
