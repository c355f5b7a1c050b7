//! Global Application State Store
//!
//! Shell state (current page, theme, notifications) with field-level
//! reactivity. Entity data lives in the query cache, not here.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::pages::Page;
use crate::theme::Theme;

/// Most toasts shown at once; older ones are dropped
pub const MAX_NOTIFICATIONS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub page: Page,
    pub theme: Theme,
    pub notifications: Vec<Notification>,
    pub next_notification_id: u32,
}

impl AppState {
    pub fn new(page: Page, theme: Theme) -> Self {
        Self {
            page,
            theme,
            next_notification_id: 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append, dropping the oldest beyond `max`
pub fn push_capped(list: &mut Vec<Notification>, notification: Notification, max: usize) {
    list.push(notification);
    if list.len() > max {
        let excess = list.len() - max;
        list.drain(..excess);
    }
}

/// Add a notification and return its id
pub fn store_push_notification(store: &AppStore, kind: NotificationKind, message: String) -> u32 {
    let id = {
        let field = store.next_notification_id();
        let mut next = field.write();
        let id = *next;
        *next += 1;
        id
    };
    let notifications = store.notifications();
    push_capped(
        &mut notifications.write(),
        Notification { id, kind, message },
        MAX_NOTIFICATIONS,
    );
    id
}

pub fn store_dismiss_notification(store: &AppStore, id: u32) {
    let notifications = store.notifications();
    notifications.write().retain(|n| n.id != id);
}

pub fn store_set_page(store: &AppStore, page: Page) {
    store.page().set(page);
}

pub fn store_toggle_theme(store: &AppStore) -> Theme {
    let theme = store.theme().get_untracked().toggled();
    store.theme().set(theme);
    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u32) -> Notification {
        Notification { id, kind: NotificationKind::Info, message: format!("n{}", id) }
    }

    #[test]
    fn test_push_capped_drops_oldest() {
        let mut list = Vec::new();
        for id in 1..=6 {
            push_capped(&mut list, note(id), MAX_NOTIFICATIONS);
        }
        let ids: Vec<u32> = list.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_store_notifications_get_increasing_ids() {
        let owner = Owner::new();
        owner.set();
        let store: AppStore = Store::new(AppState::new(Page::default(), Theme::default()));

        let first = store_push_notification(&store, NotificationKind::Success, "Saved".into());
        let second = store_push_notification(&store, NotificationKind::Error, "Failed".into());
        assert_eq!((first, second), (1, 2));
        assert_eq!(store.next_notification_id().get_untracked(), 3);

        store_dismiss_notification(&store, first);
        let left: Vec<u32> = store.notifications().get_untracked().iter().map(|n| n.id).collect();
        assert_eq!(left, vec![2]);
    }
}
