//! The directory dashboard: form state, remote sync, and the visible list.
//!
//! Every operation that talks to the remote directory reports failure twice:
//! as the returned `Err` for the caller, and as the dashboard's single
//! last-error string, which the renderers show in place of an empty table.
//! After each state change the form and list are mirrored into the
//! [`StateMirror`].

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiError, DirectoryApi};
use crate::models::{FormField, UserForm, UserRecord, next_id};
use crate::store::StateMirror;
use crate::validation::{ValidationError, validate_form};

/// Errors from dashboard operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no user with id {0} in the list")]
    UnknownUser(i64),

    #[error("no user id left after {}", i64::MAX)]
    IdsExhausted,
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(UserRecord),
    Updated(UserRecord),
}

impl SubmitOutcome {
    pub fn record(&self) -> &UserRecord {
        match self {
            SubmitOutcome::Created(r) | SubmitOutcome::Updated(r) => r,
        }
    }
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub users: &'a [UserRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<i64>,
    pub error: Option<&'a str>,
}

/// Session state for one operator.
pub struct Dashboard {
    api: Arc<dyn DirectoryApi>,
    mirror: StateMirror,
    records: Vec<UserRecord>,
    form: UserForm,
    /// Record being edited; `Some` means edit mode.
    editing: Option<UserRecord>,
    error_text: String,
}

impl Dashboard {
    /// Create an empty dashboard. Call [`Dashboard::load`] to populate it.
    pub fn new(api: Arc<dyn DirectoryApi>, mirror: StateMirror) -> Self {
        Self {
            api,
            mirror,
            records: Vec::new(),
            form: UserForm::default(),
            editing: None,
            error_text: String::new(),
        }
    }

    /// Create a dashboard with the form filled from the persisted draft.
    ///
    /// Use this before the first [`Dashboard::load`]: a load mirrors the
    /// current form, so loading first would overwrite the stored draft.
    pub fn resume(api: Arc<dyn DirectoryApi>, mirror: StateMirror) -> Self {
        let mut dash = Self::new(api, mirror);
        dash.restore_draft();
        dash
    }

    /// Fetch the full list from the remote directory.
    ///
    /// Success replaces the list and clears the error. Any failure empties
    /// the list and records the failure text.
    pub async fn load(&mut self) -> Result<usize, DashboardError> {
        let result = self.api.list_users().await;
        match result {
            Ok(users) => {
                self.records = users;
                self.error_text.clear();
                self.mirror_state();
                info!(count = self.records.len(), "user data loaded");
                Ok(self.records.len())
            }
            Err(e) => {
                self.records.clear();
                self.error_text = e.to_string();
                self.mirror_state();
                Err(e.into())
            }
        }
    }

    /// Fill the form from the persisted draft.
    pub fn restore_draft(&mut self) {
        self.form = self.mirror.restore_form();
        self.mirror_state();
    }

    /// Assign one form field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.mirror_state();
    }

    /// Validate the form and create or update a record.
    ///
    /// Validation failures never reach the network. On remote failure the
    /// list, form and edit mode are left untouched.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, DashboardError> {
        if let Err(e) = validate_form(&self.form) {
            self.error_text = e.to_string();
            return Err(e.into());
        }

        match self.editing.as_ref().map(|r| r.id) {
            Some(id) => {
                let candidate = self.form.to_record(id);
                if let Err(e) = self.api.update_user(id, &candidate).await {
                    return Err(self.fail(e));
                }
                for record in self.records.iter_mut().filter(|r| r.id == id) {
                    *record = candidate.clone();
                }
                self.editing = None;
                self.mirror_state();
                info!(id, "user data updated");
                Ok(SubmitOutcome::Updated(candidate))
            }
            None => {
                let Some(id) = next_id(&self.records) else {
                    self.error_text = DashboardError::IdsExhausted.to_string();
                    return Err(DashboardError::IdsExhausted);
                };
                let candidate = self.form.to_record(id);
                if let Err(e) = self.api.create_user(&candidate).await {
                    return Err(self.fail(e));
                }
                self.records.push(candidate.clone());
                self.form.clear();
                self.mirror_state();
                info!(id = candidate.id, "user data added");
                Ok(SubmitOutcome::Created(candidate))
            }
        }
    }

    /// Copy a listed record into the form and enter edit mode.
    pub fn begin_edit(&mut self, id: i64) -> Result<&UserRecord, DashboardError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DashboardError::UnknownUser(id))?;
        self.form = UserForm::from_record(&record);
        self.mirror_state();
        Ok(self.editing.insert(record))
    }

    /// Clear the form and leave edit mode. No network call.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
        self.mirror_state();
    }

    /// Remove a record remotely, then locally.
    pub async fn delete(&mut self, id: i64) -> Result<(), DashboardError> {
        if let Err(e) = self.api.delete_user(id).await {
            return Err(self.fail(e));
        }
        self.records.retain(|r| r.id != id);
        self.mirror_state();
        info!(id, "user data deleted");
        Ok(())
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The record being edited, as it was when editing began.
    pub fn editing(&self) -> Option<&UserRecord> {
        self.editing.as_ref()
    }

    /// Last error message, if any.
    pub fn error_text(&self) -> Option<&str> {
        (!self.error_text.is_empty()).then_some(self.error_text.as_str())
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            users: &self.records,
            editing: self.editing.as_ref().map(|r| r.id),
            error: self.error_text(),
        }
    }

    fn fail(&mut self, error: ApiError) -> DashboardError {
        self.error_text = error.to_string();
        error.into()
    }

    fn mirror_state(&mut self) {
        self.mirror.write(&self.form, &self.records);
    }
}
