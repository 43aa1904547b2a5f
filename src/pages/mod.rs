//! Kiosk Pages
//!
//! One component per route.

mod ask;
mod confirm;
mod home;
mod login;
mod owner;
mod payment;
mod products;
mod signup;
mod start;

pub use ask::AskPage;
pub use confirm::ConfirmPage;
pub use home::HomePage;
pub use login::{LoginPage, OwnerLoginPage};
pub use owner::{IngredientsPage, OwnerDashboardPage, SalesDetailsPage};
pub use payment::PaymentPage;
pub use products::ProductsPage;
pub use signup::SignupPage;
pub use start::StartPage;
