//! UI Components
//!
//! Reusable Leptos components.

mod bottle_editor;
mod delete_confirm_button;
mod idle_timer;
mod kiosk_header;
mod page_frame;
mod recipe_media;
mod recipe_modal;
mod toast_host;

pub use bottle_editor::BottleEditor;
pub use delete_confirm_button::DeleteConfirmButton;
pub use idle_timer::IdleTimer;
pub use kiosk_header::KioskHeader;
pub use page_frame::PageFrame;
pub use recipe_media::RecipeMedia;
pub use recipe_modal::{RecipeDraft, RecipeModal};
pub use toast_host::ToastHost;
