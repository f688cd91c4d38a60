//! Labels API

use axum::Extension;
use serde::Deserialize;

use crate::labels::LabelStore;
use crate::storage::Storage;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::Success;

/// The labels of the current user
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
) -> Result<Success<Vec<String>>, Error> {
    let labels = LabelStore::new(storage).fetch(&current_user.id).await?;

    Ok(Success::ok(labels.into_vec()))
}

/// Label to add
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelForm {
    name: String,
}

/// Add a label, answers with the full new set
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer some-token' \
///     -d '{ "name": "work" }' \
///     http://localhost:6000/api/labels
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    Form(form): Form<AddLabelForm>,
) -> Result<Success<Vec<String>>, Error> {
    let labels = LabelStore::new(storage)
        .add_label(&current_user.id, &form.name)
        .await?;

    Ok(Success::created(labels.into_vec()))
}
