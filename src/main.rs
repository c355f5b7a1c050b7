//! Garage Manager Frontend Entry Point

mod api;
mod app;
mod billing;
mod browser;
mod components;
mod config;
mod context;
mod draft;
mod error;
mod export;
mod hooks;
mod logger;
mod matching;
mod models;
mod money;
mod pages;
mod query;
mod store;
mod theme;
mod validation;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = Config::from_build_env();
    logger::init(config.log_level);
    log::info!("[APP] api base {}", Config::load().api_base);
    mount_to_body(App);
}
