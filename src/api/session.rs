//! Session API

use serde::Serialize;

use crate::users::UserId;

use super::CurrentUser;
use super::Error;
use super::Success;

/// The signed in user, as served to the outside world
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Who is signed in
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer some-token' http://localhost:6000/api/session
/// ```
#[allow(clippy::unused_async)]
pub async fn current(current_user: CurrentUser) -> Result<Success<SessionResponse>, Error> {
    Ok(Success::ok(SessionResponse {
        id: current_user.id.clone(),
        email: current_user.email.clone(),
        display_name: current_user.display_name.clone(),
    }))
}
