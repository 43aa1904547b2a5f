//! Auth Calls
//!
//! Both endpoints answer with the user object that becomes the session.

use super::{ApiClient, ApiError, Method};
use crate::models::{Credentials, Registration, SessionUser};

pub async fn login(api: &ApiClient, credentials: &Credentials) -> Result<SessionUser, ApiError> {
    api.send_json(Method::Post, "auth/login/", credentials).await
}

pub async fn register(api: &ApiClient, registration: &Registration) -> Result<SessionUser, ApiError> {
    api.send_json(Method::Post, "auth/register/", registration).await
}
