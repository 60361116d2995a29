//! State behind the edit screen. The API has no get-by-id endpoint, so the
//! record is found by fetching the first page of the listing and scanning it
//! for the id. A user that is not on that page (stale link, deleted, or simply
//! further down the listing) ends in `NotFound` and is not retried.

use crate::{
    app_lib::{AppError, Destination, Notice, Notifier},
    features::users::{
        client::UsersApi,
        types::{User, UserUpdate, UsersPage},
    },
};
use tracing::{debug, info, warn};

/// Listing page scanned for the record being edited.
pub const LOOKUP_PAGE: u32 = 1;
const FETCH_FAILED: &str = "Failed to fetch user details";
const UPDATE_SUCCEEDED: &str = "User updated successfully";
const UPDATE_FAILED: &str = "Failed to update user";

/// Working copy of the editable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for EditForm {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

impl EditForm {
    /// Every field is sent; there is no dirty check.
    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
        }
    }

    /// Same rule as the `required` attribute: no field may be blank.
    fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(AppError::Validation(format!("{label} is required."))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    Loading,
    Editing,
    /// Terminal: the record was not on the fetched page or the fetch failed.
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    pub id: u64,
    seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Failed(AppError),
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    pub id: u64,
    pub update: UserUpdate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No record loaded, or a submit is already running.
    NotReady,
    Invalid(AppError),
    Saved(Destination),
    Failed(AppError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditUserViewModel {
    user: Option<User>,
    form: EditForm,
    phase: EditPhase,
    in_flight: Option<LookupTicket>,
    next_seq: u64,
    submitting: bool,
    last_error: Option<AppError>,
}

impl Default for EditUserViewModel {
    fn default() -> Self {
        Self {
            user: None,
            form: EditForm::default(),
            phase: EditPhase::Idle,
            in_flight: None,
            next_seq: 0,
            submitting: false,
            last_error: None,
        }
    }
}

impl EditUserViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.form.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.form.last_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
    }

    /// Leaves the form without saving.
    pub fn cancel(&self) -> Destination {
        Destination::Users
    }

    /// Starts looking up `id`; the page to fetch is [`LOOKUP_PAGE`].
    pub fn begin_load(&mut self, id: u64) -> LookupTicket {
        self.next_seq += 1;
        let ticket = LookupTicket {
            id,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        self.user = None;
        self.form = EditForm::default();
        self.phase = EditPhase::Loading;
        self.last_error = None;
        debug!(id, page = LOOKUP_PAGE, "looking up user");
        ticket
    }

    pub fn finish_load<N: Notifier + ?Sized>(
        &mut self,
        ticket: LookupTicket,
        result: Result<UsersPage, AppError>,
        notifier: &N,
    ) -> LookupOutcome {
        if self.in_flight != Some(ticket) {
            debug!(id = ticket.id, "discarding stale user lookup");
            return LookupOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(page) => match page.data.into_iter().find(|user| user.id == ticket.id) {
                Some(user) => {
                    self.form = EditForm::from(&user);
                    self.user = Some(user);
                    self.phase = EditPhase::Editing;
                    LookupOutcome::Found
                }
                None => {
                    warn!(id = ticket.id, page = LOOKUP_PAGE, "user not on fetched page");
                    self.phase = EditPhase::NotFound;
                    self.last_error = Some(AppError::NotFound(format!("user {}", ticket.id)));
                    LookupOutcome::NotFound
                }
            },
            Err(err) => {
                warn!(id = ticket.id, error = %err, "failed to fetch user details");
                notifier.notify(Notice::error(FETCH_FAILED));
                self.phase = EditPhase::NotFound;
                self.last_error = Some(err.clone());
                LookupOutcome::Failed(err)
            }
        }
    }

    /// Validates the form and marks the submit as in flight.
    ///
    /// # Errors
    ///
    /// Returns the final outcome when nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitOutcome> {
        let Some(user) = &self.user else {
            return Err(SubmitOutcome::NotReady);
        };
        if self.submitting || self.phase != EditPhase::Editing {
            return Err(SubmitOutcome::NotReady);
        }
        if let Err(err) = self.form.validate() {
            self.last_error = Some(err.clone());
            return Err(SubmitOutcome::Invalid(err));
        }

        let ticket = SubmitTicket {
            id: user.id,
            update: self.form.to_update(),
        };
        self.submitting = true;
        self.last_error = None;
        Ok(ticket)
    }

    /// Success asks to return to the list; failure keeps the edits in place.
    pub fn finish_submit<N: Notifier + ?Sized>(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<(), AppError>,
        notifier: &N,
    ) -> SubmitOutcome {
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(id = ticket.id, "user updated");
                notifier.notify(Notice::success(UPDATE_SUCCEEDED));
                SubmitOutcome::Saved(Destination::Users)
            }
            Err(err) => {
                warn!(id = ticket.id, error = %err, "failed to update user");
                notifier.notify(Notice::error(UPDATE_FAILED));
                self.last_error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn load<A, N>(&mut self, api: &A, id: u64, notifier: &N) -> LookupOutcome
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let ticket = self.begin_load(id);
        let result = api.list_users(LOOKUP_PAGE).await;
        self.finish_load(ticket, result, notifier)
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn submit<A, N>(&mut self, api: &A, notifier: &N) -> SubmitOutcome
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let result = api.update_user(ticket.id, &ticket.update).await;
        self.finish_submit(&ticket, result, notifier)
    }
}
