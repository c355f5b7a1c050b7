//! Garage Manager App
//!
//! Shell layout: sidebar, top bar, the active page and the toast stack.

use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::browser;
use crate::components::{Notifications, Sidebar, TopBar};
use crate::context::AppContext;
use crate::pages::{Page, PageView};
use crate::query::QueryClient;
use crate::store::{store_set_page, AppState, AppStateStoreFields, AppStore};
use crate::theme::Theme;

#[component]
pub fn App() -> impl IntoView {
    let initial_page = Page::from_hash(&browser::location_hash());
    let store: AppStore = Store::new(AppState::new(initial_page, Theme::load()));
    let query = QueryClient::new();
    let ctx = AppContext::new(store, query);

    provide_context(store);
    provide_context(query);
    provide_context(ctx);
    log::info!("[APP] started on {}", initial_page.title());

    // Back/forward buttons and hand-edited URLs
    let _ = window_event_listener(ev::hashchange, move |_| {
        let page = Page::from_hash(&browser::location_hash());
        if store.page().get_untracked() != page {
            store_set_page(&store, page);
        }
    });

    let theme = move || store.theme().get();

    view! {
        <div
            class=move || format!("app-shell theme-{}", theme().as_str())
            style=move || theme().css_variables()
        >
            <Sidebar />
            <div class="app-main">
                <TopBar />
                <main class="app-content">
                    <PageView />
                </main>
            </div>
            <Notifications />
        </div>
    }
}
