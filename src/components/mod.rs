//! UI Components
//!
//! Reusable Leptos components shared by every page.

mod delete_confirm_button;
mod drawer;
mod fields;
mod modal;
mod notifications;
mod sidebar;
mod top_bar;
mod widgets;

pub use delete_confirm_button::DeleteConfirmButton;
pub use drawer::Drawer;
pub use fields::{field_error, CheckboxField, ErrorText, SelectField, TextField};
pub use modal::Modal;
pub use notifications::Notifications;
pub use sidebar::Sidebar;
pub use top_bar::TopBar;
pub use widgets::{EmptyState, ExportButton, PageHeader, QueryStatus, SearchInput, StatCard};

/// What a create/edit modal is doing
#[derive(Clone, Debug, PartialEq)]
pub enum FormMode<T> {
    Create,
    Edit(T),
}

impl<T> FormMode<T> {
    pub fn editing(&self) -> Option<&T> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(item) => Some(item),
        }
    }

    pub fn title(&self, noun: &str) -> String {
        match self {
            FormMode::Create => format!("New {}", noun),
            FormMode::Edit(_) => format!("Edit {}", noun),
        }
    }
}
