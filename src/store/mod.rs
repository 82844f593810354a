//! Application state store
//!
//! One `StateStore` exists per authenticated user session and is the
//! single source of truth every presentation surface reads from and
//! writes to. Each mutation takes the inner mutex once and performs the
//! whole read-modify-write inside it, so a reader can never observe
//! `trends` updated while `filtered_trends` is stale. No lock is ever
//! held across an await point.

mod filter;
mod registry;
mod snapshot;

pub use registry::SessionStores;
pub use snapshot::{SNAPSHOT_VERSION, StoreSnapshot};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::data::{
    GeneratedContent, Notification, NotificationKind, Trend, TrendFilter, UserAnalysis,
    UserIdentity,
};
use crate::metrics::{NOTIFICATIONS_TOTAL, STORE_MUTATIONS_TOTAL};

/// Per-session mutable state container
pub struct StateStore {
    inner: Mutex<StoreInner>,
    /// Fixed delay before a notification auto-expires
    notification_ttl: Duration,
    /// Handle to self for expiry tasks; they must not keep a dropped
    /// store alive
    weak: Weak<StateStore>,
}

#[derive(Default)]
struct StoreInner {
    // User state
    identity: Option<UserIdentity>,
    authenticated: bool,
    analyses: Vec<UserAnalysis>,

    // Trends state
    trends: Vec<Trend>,
    filtered_trends: Vec<Trend>,
    filter: TrendFilter,
    bookmarks: HashSet<String>,

    // Content state
    content_history: Vec<GeneratedContent>,
    current_generation: Option<GeneratedContent>,

    // UI state
    is_loading: bool,
    active_modal: Option<String>,
    notifications: Vec<Notification>,
    next_notification_id: u64,
    /// Expiry task handle per live notification, aborted on dismissal
    expiry_tasks: HashMap<u64, AbortHandle>,
}

impl StateStore {
    /// Create an empty store.
    pub fn new(notification_ttl: Duration) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            inner: Mutex::new(StoreInner::default()),
            notification_ttl,
            weak: weak.clone(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // A poisoned store means a panic mid-mutation; propagating the
        // panic is the only honest option.
        self.inner.lock().expect("state store mutex poisoned")
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Set or clear the identity mirror.
    ///
    /// A non-null identity also marks the session authenticated; null
    /// marks it unauthenticated. Token lifecycle is the caller's job.
    pub fn set_identity(&self, identity: Option<UserIdentity>) {
        let mut inner = self.lock();
        inner.authenticated = identity.is_some();
        inner.identity = identity;
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["set_identity"])
            .inc();
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.lock().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    /// Append a profile analysis to the history.
    pub fn add_analysis(&self, analysis: UserAnalysis) {
        let mut inner = self.lock();
        inner.analyses.push(analysis);
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["add_analysis"])
            .inc();
    }

    pub fn analyses(&self) -> Vec<UserAnalysis> {
        self.lock().analyses.clone()
    }

    // =========================================================================
    // Trends
    // =========================================================================

    /// Replace the trend collection.
    ///
    /// The filter criteria reset to neutral and the filtered view
    /// becomes the full new list, in one atomic step; a stale filter is
    /// never silently applied to fresh data.
    pub fn load_trends(&self, trends: Vec<Trend>) {
        let mut inner = self.lock();
        inner.filter = TrendFilter::neutral();
        inner.filtered_trends = trends.clone();
        inner.trends = trends;
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["load_trends"])
            .inc();
    }

    /// Store filter criteria and recompute the filtered view.
    ///
    /// Idempotent: re-applying identical criteria yields an identical
    /// view with no further effects.
    pub fn apply_filter(&self, criteria: TrendFilter) {
        let mut inner = self.lock();
        let filtered = filter::apply(&inner.trends, &criteria);
        inner.filtered_trends = filtered;
        inner.filter = criteria;
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["apply_filter"])
            .inc();
    }

    pub fn trends(&self) -> Vec<Trend> {
        self.lock().trends.clone()
    }

    pub fn filtered_trends(&self) -> Vec<Trend> {
        self.lock().filtered_trends.clone()
    }

    pub fn filter(&self) -> TrendFilter {
        self.lock().filter.clone()
    }

    /// Flip bookmark membership for a trend id.
    ///
    /// # Returns
    /// The new membership state, so callers can render feedback without
    /// a second read.
    pub fn toggle_bookmark(&self, trend_id: &str) -> bool {
        let mut inner = self.lock();
        let bookmarked = if inner.bookmarks.remove(trend_id) {
            false
        } else {
            inner.bookmarks.insert(trend_id.to_string());
            true
        };
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["toggle_bookmark"])
            .inc();
        bookmarked
    }

    pub fn is_bookmarked(&self, trend_id: &str) -> bool {
        self.lock().bookmarks.contains(trend_id)
    }

    pub fn bookmarks(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().bookmarks.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }

    // =========================================================================
    // Generated content
    // =========================================================================

    /// Prepend a generated content entry to the history.
    ///
    /// Newest-first ordering is a hard invariant.
    pub fn record_generated_content(&self, content: GeneratedContent) {
        let mut inner = self.lock();
        inner.current_generation = Some(content.clone());
        inner.content_history.insert(0, content);
        STORE_MUTATIONS_TOTAL
            .with_label_values(&["record_generated_content"])
            .inc();
    }

    pub fn content_history(&self) -> Vec<GeneratedContent> {
        self.lock().content_history.clone()
    }

    pub fn current_generation(&self) -> Option<GeneratedContent> {
        self.lock().current_generation.clone()
    }

    // =========================================================================
    // UI flags
    // =========================================================================

    /// Set the pending-generation flag.
    ///
    /// Presentation layers use this to disable duplicate submissions;
    /// the store does not deduplicate concurrent requests itself.
    pub fn set_loading(&self, loading: bool) {
        self.lock().is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn set_active_modal(&self, modal: Option<String>) {
        self.lock().active_modal = modal;
    }

    pub fn active_modal(&self) -> Option<String> {
        self.lock().active_modal.clone()
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Append a notification and schedule its expiry.
    ///
    /// Ids are monotonic per store, collision-free within a session.
    /// The expiry task holds only a weak reference; a store dropped
    /// before the timer fires is simply gone.
    pub fn enqueue_notification(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_notification_id;
        inner.next_notification_id += 1;
        inner.notifications.push(Notification {
            id,
            kind,
            message: message.into(),
        });

        let weak = self.weak.clone();
        let ttl = self.notification_ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(store) = weak.upgrade() {
                store.expire_notification(id);
            }
        });
        inner.expiry_tasks.insert(id, handle.abort_handle());

        STORE_MUTATIONS_TOTAL
            .with_label_values(&["enqueue_notification"])
            .inc();
        id
    }

    /// Remove a notification by id and cancel its expiry timer.
    ///
    /// No-op if the id is already gone (expired or double-dismissed).
    pub fn dismiss_notification(&self, id: u64) {
        let mut inner = self.lock();
        let existed = remove_notification(&mut inner.notifications, id);
        if let Some(handle) = inner.expiry_tasks.remove(&id) {
            handle.abort();
        }
        if existed {
            NOTIFICATIONS_TOTAL.with_label_values(&["dismissed"]).inc();
        }
    }

    /// Timer path: remove the notification if it is still present.
    ///
    /// Harmless when the entry was dismissed first and the abort lost
    /// the race; nothing is re-added and nothing panics.
    fn expire_notification(&self, id: u64) {
        let mut inner = self.lock();
        let existed = remove_notification(&mut inner.notifications, id);
        inner.expiry_tasks.remove(&id);
        if existed {
            NOTIFICATIONS_TOTAL.with_label_values(&["expired"]).inc();
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    // =========================================================================
    // Persistence boundary
    // =========================================================================

    /// Capture the durable subset of this store.
    pub fn snapshot(&self) -> StoreSnapshot {
        let inner = self.lock();
        let mut bookmarks: Vec<String> = inner.bookmarks.iter().cloned().collect();
        bookmarks.sort_unstable();
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            identity: inner.identity.clone(),
            authenticated: inner.authenticated,
            analyses: inner.analyses.clone(),
            bookmarks,
            content_history: inner.content_history.clone(),
        }
    }

    /// Restore the durable subset from a snapshot.
    ///
    /// Ephemeral state (trends, filter, flags, notifications) is left
    /// untouched: it is rebuilt fresh each session.
    pub fn restore(&self, snapshot: StoreSnapshot) {
        let mut inner = self.lock();
        inner.authenticated = snapshot.authenticated;
        inner.identity = snapshot.identity;
        inner.analyses = snapshot.analyses;
        inner.bookmarks = snapshot.bookmarks.into_iter().collect();
        inner.content_history = snapshot.content_history;
    }
}

fn remove_notification(notifications: &mut Vec<Notification>, id: u64) -> bool {
    match notifications.iter().position(|n| n.id == id) {
        Some(index) => {
            notifications.remove(index);
            true
        }
        None => false,
    }
}
