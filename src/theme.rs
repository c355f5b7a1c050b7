//! Theme Tokens
//!
//! Colors and spacing exposed as CSS custom properties on the app shell.

use crate::browser;
use crate::models::WorkOrderStatus;

const THEME_STORAGE_KEY: &str = "garage.theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

const SHARED_TOKENS: &[(&str, &str)] = &[
    ("--radius", "8px"),
    ("--space-1", "4px"),
    ("--space-2", "8px"),
    ("--space-3", "16px"),
    ("--space-4", "24px"),
    ("--sidebar-width", "220px"),
    ("--font", "'Inter', system-ui, sans-serif"),
];

const LIGHT_TOKENS: &[(&str, &str)] = &[
    ("--bg", "#f5f6f8"),
    ("--surface", "#ffffff"),
    ("--text", "#1f2430"),
    ("--muted", "#6b7280"),
    ("--border", "#e2e5ea"),
    ("--accent", "#d9480f"),
    ("--success", "#2f9e44"),
    ("--warning", "#f08c00"),
    ("--danger", "#e03131"),
];

const DARK_TOKENS: &[(&str, &str)] = &[
    ("--bg", "#14161b"),
    ("--surface", "#1d2027"),
    ("--text", "#e8eaef"),
    ("--muted", "#9aa1ad"),
    ("--border", "#2d313a"),
    ("--accent", "#ff7a3d"),
    ("--success", "#51cf66"),
    ("--warning", "#fcc419"),
    ("--danger", "#ff6b6b"),
];

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Theme::Light => LIGHT_TOKENS,
            Theme::Dark => DARK_TOKENS,
        }
    }

    /// Inline style for the shell root
    pub fn css_variables(&self) -> String {
        SHARED_TOKENS
            .iter()
            .chain(self.palette())
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn load() -> Theme {
        browser::storage_get(THEME_STORAGE_KEY)
            .map(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        browser::storage_set(THEME_STORAGE_KEY, self.as_str());
    }
}

/// Badge class for a work order status
pub fn status_badge_class(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Pending => "badge badge-warning",
        WorkOrderStatus::InProgress => "badge badge-accent",
        WorkOrderStatus::Completed | WorkOrderStatus::Delivered => "badge badge-success",
        WorkOrderStatus::Cancelled => "badge badge-danger",
        WorkOrderStatus::Unknown => "badge",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variables_include_shared_and_palette() {
        let css = Theme::Dark.css_variables();
        assert!(css.starts_with("--radius: 8px;"));
        assert!(css.contains("--bg: #14161b;"));
        assert!(!css.contains("#f5f6f8"));
    }

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
