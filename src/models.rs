//! Frontend Models
//!
//! Backend entities come from `mixion-core`; this module adds the view-only
//! types the kiosk pages share.

pub use mixion_core::models::*;
use mixion_core::Ticket;

/// Toast kind, which also picks the auto-dismiss delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

/// Button shown next to a toast message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastAction {
    /// Reverse the recipe deletion behind this ticket
    UndoDelete(Ticket),
}

impl ToastAction {
    pub fn label(self) -> &'static str {
        match self {
            ToastAction::UndoDelete(_) => "Undo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub action: Option<ToastAction>,
}

/// Simulated payment progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    Dispensing,
}

impl PaymentStatus {
    pub fn message(self) -> &'static str {
        match self {
            PaymentStatus::Idle => "Choose a payment method",
            PaymentStatus::Processing => "Processing payment...",
            PaymentStatus::Dispensing => "Dispensing your drink...",
        }
    }
}
