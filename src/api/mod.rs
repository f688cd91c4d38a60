//! All API endpoint setup

use axum::Router;
use axum::routing::get;
use axum::routing::post;

use crate::storage::Storage;

pub use current_user::Claims;
pub use current_user::CurrentUser;
pub use current_user::JwtKeys;
pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use response::Error;
pub use response::Success;

mod current_user;
mod labels;
mod notes;
mod request;
mod response;
mod session;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let notes = Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route(
            "/{note}",
            get(notes::single::<S>)
                .patch(notes::update::<S>)
                .delete(notes::delete::<S>),
        )
        .route("/{note}/pin", post(notes::toggle_pin::<S>));

    let labels = Router::new().route("/", get(labels::list::<S>).post(labels::create::<S>));

    Router::new()
        .route("/session", get(session::current))
        .nest("/notes", notes)
        .nest("/labels", labels)
}

/// Answer for anything that is not a route
#[allow(clippy::unused_async)]
pub async fn not_found() -> Error {
    Error::not_found("Not found")
}
