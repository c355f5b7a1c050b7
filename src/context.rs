//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::error::ApiError;
use crate::pages::Page;
use crate::query::QueryClient;
use crate::store::{self, AppStore, NotificationKind};

/// Toasts disappear after this long
const NOTIFICATION_TTL_MS: u32 = 4_000;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    pub query: QueryClient,
}

impl AppContext {
    pub fn new(store: AppStore, query: QueryClient) -> Self {
        Self { store, query }
    }

    /// Switch page and mirror it into the URL hash
    pub fn navigate(&self, page: Page) {
        store::store_set_page(&self.store, page);
        browser::set_location_hash(page.hash());
    }

    /// Mark every cache key under these prefixes stale
    pub fn invalidate(&self, prefixes: &[&str]) {
        for prefix in prefixes {
            self.query.invalidate(prefix);
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let store = self.store;
        let id = store::store_push_notification(&store, kind, message.into());
        spawn_local(async move {
            TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
            store::store_dismiss_notification(&store, id);
        });
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn notify_error(&self, err: &ApiError) {
        match err.status() {
            Some(status) if status < 500 => log::warn!("[APP] {}", err),
            _ => log::error!("[APP] {}", err),
        }
        self.notify(NotificationKind::Error, err.to_string());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
