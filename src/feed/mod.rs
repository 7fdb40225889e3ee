//! Realtime change feed.
//!
//! Subscriptions are keyed by table name plus an optional row filter of the
//! form `site_id=eq.<uuid>`, and deliver insert/update/delete events to the
//! subscribed receivers. Unsubscription is keyed by the same composite name.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

/// The kind of row change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    /// A row was inserted.
    Insert,
    /// A row was updated in place.
    Update,
    /// A row was deleted.
    Delete,
}

/// A single row change delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The table the change happened on.
    pub table: String,
    /// Insert, update, or delete.
    pub op: ChangeOp,
    /// The changed row's identifier.
    pub row_id: Uuid,
    /// The site the row belongs to, when the table has one.
    pub site_id: Option<Uuid>,
}

enum RowFilter {
    /// No filter; every row on the table matches.
    All,
    /// Only rows belonging to this site match.
    Site(Uuid),
    /// The filter string was unrecognized; no row matches.
    Unmatchable,
}

impl RowFilter {
    fn matches(&self, event: &ChangeEvent) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::Site(wanted) => event.site_id == Some(*wanted),
            RowFilter::Unmatchable => false,
        }
    }
}

struct Subscription {
    sender: broadcast::Sender<ChangeEvent>,
    filter: RowFilter,
}

/// An in-process subscription hub for row-change notifications.
///
/// # Example
///
/// ```
/// use roster_engine::feed::{ChangeEvent, ChangeFeed, ChangeOp};
/// use uuid::Uuid;
///
/// let feed = ChangeFeed::new();
/// let mut rx = feed.subscribe("shifts", None);
/// feed.publish(ChangeEvent {
///     table: "shifts".to_string(),
///     op: ChangeOp::Insert,
///     row_id: Uuid::new_v4(),
///     site_id: None,
/// });
/// assert_eq!(rx.try_recv().unwrap().op, ChangeOp::Insert);
/// ```
#[derive(Default)]
pub struct ChangeFeed {
    subscriptions: RwLock<HashMap<String, Subscription>>,
}

const CHANNEL_CAPACITY: usize = 64;

impl ChangeFeed {
    /// Creates an empty feed with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_name(table: &str, filter: Option<&str>) -> String {
        match filter {
            Some(f) => format!("{}:{}", table, f),
            None => table.to_string(),
        }
    }

    fn parse_site_filter(filter: &str) -> Option<Uuid> {
        let value = filter.strip_prefix("site_id=eq.")?;
        Uuid::from_str(value).ok()
    }

    /// Registers a subscription for a table, optionally filtered to rows of
    /// one site (`site_id=eq.<uuid>`), and returns the event receiver.
    ///
    /// Subscribing again under the same composite name attaches a second
    /// receiver to the existing channel.
    pub fn subscribe(&self, table: &str, filter: Option<&str>) -> broadcast::Receiver<ChangeEvent> {
        let name = Self::composite_name(table, filter);
        let row_filter = match filter {
            None => RowFilter::All,
            Some(f) => match Self::parse_site_filter(f) {
                Some(site_id) => RowFilter::Site(site_id),
                None => {
                    warn!(
                        table,
                        filter = f,
                        "Unrecognized subscription filter; no rows will match"
                    );
                    RowFilter::Unmatchable
                }
            },
        };

        let mut subscriptions = match self.subscriptions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscriptions
            .entry(name)
            .or_insert_with(|| {
                let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
                Subscription {
                    sender,
                    filter: row_filter,
                }
            })
            .sender
            .subscribe()
    }

    /// Drops the subscription registered under the same composite name.
    pub fn unsubscribe(&self, table: &str, filter: Option<&str>) {
        let name = Self::composite_name(table, filter);
        let mut subscriptions = match self.subscriptions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscriptions.remove(&name);
    }

    /// Delivers an event to every matching subscription.
    ///
    /// A send to a channel with no live receivers is not an error; the event
    /// is simply dropped for that subscription.
    pub fn publish(&self, event: ChangeEvent) {
        let subscriptions = match self.subscriptions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (name, subscription) in subscriptions.iter() {
            let table_matches =
                name == &event.table || name.starts_with(&format!("{}:", event.table));
            if !table_matches || !subscription.filter.matches(&event) {
                continue;
            }
            let _ = subscription.sender.send(event.clone());
        }
    }
}
