//! Owner Pages
//!
//! Dashboard, ingredient management and sales history. All of them require
//! an owner session.

mod dashboard;
mod ingredients;
mod sales_details;

pub use dashboard::OwnerDashboardPage;
pub use ingredients::IngredientsPage;
pub use sales_details::SalesDetailsPage;

use wasm_bindgen::JsValue;

use crate::models::{DailyCount, MachineRef};

/// Local wall-clock time of an ISO timestamp, or the raw text if unparseable
fn local_time(timestamp: &str) -> String {
    parse_date(timestamp).map_or_else(
        || timestamp.to_string(),
        |date| String::from(date.to_locale_time_string("en-IN")),
    )
}

fn local_date_time(timestamp: &str) -> String {
    parse_date(timestamp).map_or_else(
        || timestamp.to_string(),
        |date| String::from(date.to_locale_string("en-IN", &JsValue::UNDEFINED)),
    )
}

fn parse_date(timestamp: &str) -> Option<js_sys::Date> {
    let date = js_sys::Date::new(&JsValue::from_str(timestamp));
    (!date.get_time().is_nan()).then_some(date)
}

fn machine_label(sale: &DailyCount) -> String {
    match &sale.machine {
        Some(MachineRef::Machine(machine)) => machine.display_name().to_string(),
        Some(MachineRef::Id(id)) => id.clone(),
        None => "-".to_string(),
    }
}
