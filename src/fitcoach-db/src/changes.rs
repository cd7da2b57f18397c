//! Change notifications for anything that renders store data.
//!
//! Every committed write publishes a [`Change`]. Views register an [`Interest`] in one
//! collection, optionally narrowed to a client or a session, and re-query when
//! [`Subscription::next`] yields. Scheduling the re-render is up to the caller.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Clients,
    Sessions,
    Exercises,
    WeightLogs,
    Programs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// Record id, `None` when several records went at once
    pub id: Option<i32>,
    pub client_id: Option<i32>,
    pub session_id: Option<i32>,
}

impl Change {
    pub(crate) fn new(collection: Collection, kind: ChangeKind, id: i32) -> Self {
        Self {
            collection,
            kind,
            id: Some(id),
            client_id: None,
            session_id: None,
        }
    }

    pub(crate) fn bulk_delete(collection: Collection, client_id: i32) -> Self {
        Self {
            collection,
            kind: ChangeKind::Deleted,
            id: None,
            client_id: Some(client_id),
            session_id: None,
        }
    }

    pub(crate) fn client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub(crate) fn session(mut self, session_id: i32) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// What a subscriber wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest {
    pub collection: Collection,
    pub client_id: Option<i32>,
    pub session_id: Option<i32>,
}

impl Interest {
    pub fn collection(collection: Collection) -> Self {
        Self {
            collection,
            client_id: None,
            session_id: None,
        }
    }

    pub fn for_client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn for_session(mut self, session_id: i32) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn matches(&self, change: &Change) -> bool {
        self.collection == change.collection
            && self
                .client_id
                .is_none_or(|id| change.client_id == Some(id))
            && self
                .session_id
                .is_none_or(|id| change.session_id == Some(id))
    }
}

pub struct Subscription {
    interest: Interest,
    receiver: broadcast::Receiver<Change>,
}

impl Subscription {
    pub fn interest(&self) -> Interest {
        self.interest
    }

    /// Waits for the next matching change, `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Change> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if self.interest.matches(&change) => return Some(change),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, {} changes skipped",
                        self.interest.collection, skipped
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns a matching change that is already queued, without waiting.
    pub fn try_next(&mut self) -> Option<Change> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) if self.interest.matches(&change) => return Some(change),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, {} changes skipped",
                        self.interest.collection, skipped
                    );
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

#[derive(Clone)]
pub(crate) struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl ChangeFeed {
    pub const CAPACITY: usize = 256;

    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self, interest: Interest) -> Subscription {
        Subscription {
            interest,
            receiver: self.sender.subscribe(),
        }
    }

    pub fn publish(&self, change: Change) {
        // Nobody listening is fine
        if self.sender.send(change).is_err() {
            trace!("No subscribers for {} change", change.collection);
        }
    }

    pub fn publish_all(&self, changes: impl IntoIterator<Item = Change>) {
        changes.into_iter().for_each(|change| self.publish(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interest_filters_by_client_and_session() {
        let change = Change::new(Collection::Exercises, ChangeKind::Inserted, 10)
            .client(1)
            .session(4);

        assert!(Interest::collection(Collection::Exercises).matches(&change));
        assert!(
            Interest::collection(Collection::Exercises)
                .for_session(4)
                .matches(&change)
        );
        assert!(
            !Interest::collection(Collection::Exercises)
                .for_session(5)
                .matches(&change)
        );
        assert!(
            !Interest::collection(Collection::Exercises)
                .for_client(2)
                .matches(&change)
        );
        assert!(!Interest::collection(Collection::Sessions).matches(&change));
    }

    #[test]
    fn subscription_skips_unrelated_changes() {
        let feed = ChangeFeed::new();
        let mut subscription =
            feed.subscribe(Interest::collection(Collection::WeightLogs).for_client(3));

        feed.publish(Change::new(Collection::WeightLogs, ChangeKind::Inserted, 1).client(2));
        feed.publish(Change::new(Collection::Sessions, ChangeKind::Inserted, 1).client(3));
        feed.publish(Change::new(Collection::WeightLogs, ChangeKind::Updated, 8).client(3));

        let change = subscription.try_next().unwrap();
        assert_eq!(change.kind, ChangeKind::Updated);
        assert_eq!(change.id, Some(8));
        assert_eq!(subscription.try_next(), None);
    }

    #[tokio::test]
    async fn next_ends_when_feed_is_dropped() {
        let feed = ChangeFeed::new();
        let mut subscription = feed.subscribe(Interest::collection(Collection::Clients));

        feed.publish(Change::new(Collection::Clients, ChangeKind::Deleted, 2).client(2));
        drop(feed);

        assert_eq!(
            subscription.next().await.map(|change| change.kind),
            Some(ChangeKind::Deleted)
        );
        assert_eq!(subscription.next().await, None);
    }
}
