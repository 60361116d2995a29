//! State behind the users list screen: the page of users currently held, the
//! pagination cursor, the loading phase and the search term.
//!
//! Fetches are split into `begin_load` / `finish_load` so the route can run
//! the request on the browser's task queue. Each load hands out a
//! [`LoadTicket`]; a completion whose ticket is no longer the one in flight is
//! dropped, so a slow response for a page the user already left cannot
//! overwrite the page being viewed.
//!
//! Deleting a user removes it from the held page only. The page is not
//! refetched, so `total_pages` and the page contents can go stale until the
//! next navigation; emptying a page does not move to the previous one.

use crate::{
    app_lib::{AppError, Confirm, Notice, Notifier},
    features::users::{
        client::UsersApi,
        search::filter_users,
        types::{User, UsersPage},
    },
};
use tracing::{debug, info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";
const FETCH_FAILED: &str = "Failed to fetch users";
const DELETE_SUCCEEDED: &str = "User deleted successfully";
const DELETE_FAILED: &str = "Failed to delete user";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// Data (possibly none) is held; `last_error` is the most recent failure.
    Ready { last_error: Option<AppError> },
}

/// Tags one `list_users` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub page: u32,
    seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed(AppError),
    /// The API answered 401; the route should send the user to `/login`.
    SessionExpired,
    /// Superseded by a later load; state untouched.
    Discarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteTicket {
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Not confirmed, or another delete is still running.
    Declined,
    Deleted,
    Failed(AppError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsersListViewModel {
    page: u32,
    total_pages: u32,
    users: Vec<User>,
    phase: ListPhase,
    search_term: String,
    in_flight: Option<LoadTicket>,
    next_seq: u64,
    pending_delete: Option<u64>,
}

impl Default for UsersListViewModel {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            users: Vec::new(),
            phase: ListPhase::Idle,
            search_term: String::new(),
            in_flight: None,
            next_seq: 0,
            pending_delete: None,
        }
    }
}

impl UsersListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page of the users currently held.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page being shown or fetched: the in-flight target while loading.
    pub fn current_page(&self) -> u32 {
        self.in_flight.map_or(self.page, |ticket| ticket.page)
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn last_error(&self) -> Option<&AppError> {
        match &self.phase {
            ListPhase::Ready { last_error } => last_error.as_ref(),
            _ => None,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Pure state update; never refetches.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Held users matching the search term.
    pub fn filtered(&self) -> Vec<&User> {
        filter_users(&self.users, &self.search_term)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page() > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page() < self.total_pages
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page(), self.total_pages)
    }

    pub fn is_deleting(&self, id: u64) -> bool {
        self.pending_delete == Some(id)
    }

    /// Starts fetching `page`. Any earlier load still in flight is superseded.
    pub fn begin_load(&mut self, page: u32) -> LoadTicket {
        self.next_seq += 1;
        let ticket = LoadTicket {
            page: page.max(1),
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        self.phase = ListPhase::Loading;
        debug!(page = ticket.page, "loading users page");
        ticket
    }

    /// Applies the result of the load identified by `ticket`.
    pub fn finish_load<N: Notifier + ?Sized>(
        &mut self,
        ticket: LoadTicket,
        result: Result<UsersPage, AppError>,
        notifier: &N,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            debug!(page = ticket.page, "discarding stale users page response");
            return LoadOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(fetched) => {
                self.page = ticket.page;
                self.total_pages = fetched.total_pages.max(1);
                self.users = fetched.data;
                self.phase = ListPhase::Ready { last_error: None };
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(page = ticket.page, error = %err, "failed to fetch users");
                notifier.notify(Notice::error(FETCH_FAILED));
                self.phase = ListPhase::Ready {
                    last_error: Some(err.clone()),
                };
                if err.is_unauthorized() {
                    LoadOutcome::SessionExpired
                } else {
                    LoadOutcome::Failed(err)
                }
            }
        }
    }

    /// Clamps `page` into `[1, total_pages]` and starts a load, unless the
    /// clamped page is the one already shown.
    pub fn request_page(&mut self, page: u32) -> Option<LoadTicket> {
        let target = page.clamp(1, self.total_pages);
        if target == self.current_page() && self.phase != ListPhase::Idle {
            return None;
        }
        Some(self.begin_load(target))
    }

    pub fn request_next(&mut self) -> Option<LoadTicket> {
        self.request_page(self.current_page().saturating_add(1))
    }

    pub fn request_previous(&mut self) -> Option<LoadTicket> {
        self.request_page(self.current_page().saturating_sub(1))
    }

    /// Asks for confirmation and reserves the delete slot.
    pub fn begin_delete<C: Confirm + ?Sized>(
        &mut self,
        id: u64,
        confirm: &C,
    ) -> Option<DeleteTicket> {
        if self.pending_delete.is_some() {
            return None;
        }
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete not confirmed");
            return None;
        }
        self.pending_delete = Some(id);
        Some(DeleteTicket { id })
    }

    /// On success removes the matching user from the held page; on failure
    /// leaves the page as it was.
    pub fn finish_delete<N: Notifier + ?Sized>(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), AppError>,
        notifier: &N,
    ) -> DeleteOutcome {
        self.pending_delete = None;

        match result {
            Ok(()) => {
                if let Some(index) = self.users.iter().position(|user| user.id == ticket.id) {
                    self.users.remove(index);
                }
                if let ListPhase::Ready { last_error } = &mut self.phase {
                    *last_error = None;
                }
                info!(id = ticket.id, "user deleted");
                notifier.notify(Notice::success(DELETE_SUCCEEDED));
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(id = ticket.id, error = %err, "failed to delete user");
                notifier.notify(Notice::error(DELETE_FAILED));
                if let ListPhase::Ready { last_error } = &mut self.phase {
                    *last_error = Some(err.clone());
                }
                DeleteOutcome::Failed(err)
            }
        }
    }

    // The async wrappers below run a whole operation in one call. Routes
    // drive the begin/finish pairs directly.

    /// Fetches `page` and applies it.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn load_page<A, N>(&mut self, api: &A, page: u32, notifier: &N) -> LoadOutcome
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let ticket = self.begin_load(page);
        let result = api.list_users(ticket.page).await;
        self.finish_load(ticket, result, notifier)
    }

    /// Clamped navigation; `None` when the page would not change.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn go_to_page<A, N>(
        &mut self,
        api: &A,
        page: u32,
        notifier: &N,
    ) -> Option<LoadOutcome>
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let ticket = self.request_page(page)?;
        let result = api.list_users(ticket.page).await;
        Some(self.finish_load(ticket, result, notifier))
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn next_page<A, N>(&mut self, api: &A, notifier: &N) -> Option<LoadOutcome>
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let page = self.current_page().saturating_add(1);
        self.go_to_page(api, page, notifier).await
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn previous_page<A, N>(&mut self, api: &A, notifier: &N) -> Option<LoadOutcome>
    where
        A: UsersApi,
        N: Notifier + ?Sized,
    {
        let page = self.current_page().saturating_sub(1);
        self.go_to_page(api, page, notifier).await
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn delete_user<A, C, N>(
        &mut self,
        api: &A,
        id: u64,
        confirm: &C,
        notifier: &N,
    ) -> DeleteOutcome
    where
        A: UsersApi,
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(ticket) = self.begin_delete(id, confirm) else {
            return DeleteOutcome::Declined;
        };
        let result = api.delete_user(ticket.id).await;
        self.finish_delete(ticket, result, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_lib::{
            NoticeKind,
            feedback::testing::{FixedConfirm, RecordingNotifier},
        },
        features::users::client::testing::{FakeUsersApi, page_of, user},
    };

    fn first_page() -> UsersPage {
        page_of(
            1,
            2,
            vec![
                user(1, "George", "Bluth", "george.bluth@reqres.in"),
                user(2, "Janet", "Weaver", "janet.weaver@reqres.in"),
                user(3, "Emma", "Wong", "emma.wong@reqres.in"),
            ],
        )
    }

    fn second_page() -> UsersPage {
        page_of(
            2,
            2,
            vec![
                user(7, "Michael", "Lawson", "michael.lawson@reqres.in"),
                user(8, "Lindsay", "Ferguson", "lindsay.ferguson@reqres.in"),
            ],
        )
    }

    fn fake_api() -> FakeUsersApi {
        FakeUsersApi::default()
            .with_page(first_page())
            .with_page(second_page())
    }

    fn ids(list: &UsersListViewModel) -> Vec<u64> {
        list.users().iter().map(|user| user.id).collect()
    }

    async fn loaded(api: &FakeUsersApi) -> UsersListViewModel {
        let mut list = UsersListViewModel::new();
        let outcome = list.load_page(api, 1, &RecordingNotifier::default()).await;
        assert_eq!(outcome, LoadOutcome::Applied);
        list
    }

    #[test]
    fn starts_idle_on_page_one() {
        let list = UsersListViewModel::new();
        assert_eq!(list.phase(), &ListPhase::Idle);
        assert_eq!(list.page(), 1);
        assert_eq!(list.total_pages(), 1);
        assert!(list.users().is_empty());
    }

    #[tokio::test]
    async fn load_page_stores_page_and_total() {
        let api = fake_api();
        let list = loaded(&api).await;

        assert_eq!(list.phase(), &ListPhase::Ready { last_error: None });
        assert_eq!(list.page(), 1);
        assert_eq!(list.total_pages(), 2);
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert_eq!(list.page_label(), "Page 1 of 2");
    }

    #[tokio::test]
    async fn begin_load_marks_loading() {
        let mut list = UsersListViewModel::new();
        let ticket = list.begin_load(1);

        assert!(list.is_loading());
        assert_eq!(ticket.page, 1);
    }

    #[tokio::test]
    async fn go_to_page_within_bounds_lands_on_that_page() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let notifier = RecordingNotifier::default();

        let outcome = list.go_to_page(&api, 2, &notifier).await;

        assert_eq!(outcome, Some(LoadOutcome::Applied));
        assert_eq!(list.page(), 2);
        assert_eq!(ids(&list), vec![7, 8]);
        assert!(!list.can_go_next());
        assert!(list.can_go_previous());
    }

    #[tokio::test]
    async fn go_to_page_clamps_out_of_range_requests() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let notifier = RecordingNotifier::default();

        assert_eq!(list.go_to_page(&api, 0, &notifier).await, None);
        assert_eq!(
            list.go_to_page(&api, 3, &notifier).await,
            Some(LoadOutcome::Applied)
        );
        assert_eq!(list.page(), 2);
        assert_eq!(list.go_to_page(&api, 99, &notifier).await, None);

        assert_eq!(*api.list_calls.borrow(), vec![1, 2]);
        assert!(
            api.list_calls
                .borrow()
                .iter()
                .all(|page| (1..=2).contains(page))
        );
    }

    #[tokio::test]
    async fn go_to_current_page_is_a_no_op() {
        let api = fake_api();
        let mut list = loaded(&api).await;

        let outcome = list.go_to_page(&api, 1, &RecordingNotifier::default()).await;

        assert_eq!(outcome, None);
        assert_eq!(*api.list_calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn next_and_previous_step_through_pages() {
        let api = fake_api();
        let mut list = loaded(&api).await;

        assert!(list.request_previous().is_none());
        let ticket = list.request_next().expect("next page");
        assert_eq!(ticket.page, 2);
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.page_label(), "Page 2 of 2");
    }

    #[tokio::test]
    async fn next_page_and_previous_page_stop_at_bounds() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let notifier = RecordingNotifier::default();

        assert_eq!(list.previous_page(&api, &notifier).await, None);
        assert_eq!(
            list.next_page(&api, &notifier).await,
            Some(LoadOutcome::Applied)
        );
        assert_eq!(list.next_page(&api, &notifier).await, None);
        assert_eq!(
            list.previous_page(&api, &notifier).await,
            Some(LoadOutcome::Applied)
        );

        assert_eq!(list.page(), 1);
        assert_eq!(*api.list_calls.borrow(), vec![1, 2, 1]);
    }

    #[tokio::test]
    async fn failed_load_keeps_prior_data_and_reports() {
        let api = fake_api().fail_next_list(AppError::Network("offline".to_string()));
        let notifier = RecordingNotifier::default();
        let mut list = UsersListViewModel::new();

        let first = list.load_page(&api, 1, &notifier).await;
        assert!(matches!(first, LoadOutcome::Failed(AppError::Network(_))));
        assert!(list.users().is_empty());

        list.load_page(&api, 1, &notifier).await;
        let outcome = list.go_to_page(&api, 2, &notifier).await;
        assert_eq!(outcome, Some(LoadOutcome::Applied));

        let api = api.fail_next_list(AppError::Http {
            status: 500,
            message: "boom".to_string(),
        });
        let outcome = list.go_to_page(&api, 1, &notifier).await;

        assert!(matches!(outcome, Some(LoadOutcome::Failed(_))));
        assert_eq!(list.page(), 2);
        assert_eq!(ids(&list), vec![7, 8]);
        assert!(list.last_error().is_some());
        assert_eq!(
            notifier.messages(NoticeKind::Error),
            vec!["Failed to fetch users", "Failed to fetch users"]
        );
    }

    #[tokio::test]
    async fn unauthorized_load_asks_for_login() {
        let api = fake_api().fail_next_list(AppError::Http {
            status: 401,
            message: "Missing token".to_string(),
        });
        let mut list = UsersListViewModel::new();

        let outcome = list.load_page(&api, 1, &RecordingNotifier::default()).await;

        assert_eq!(outcome, LoadOutcome::SessionExpired);
    }

    #[test]
    fn stale_response_is_discarded() {
        let notifier = RecordingNotifier::default();
        let mut list = UsersListViewModel::new();
        let initial = list.begin_load(1);
        list.finish_load(initial, Ok(first_page()), &notifier);

        let to_two = list.request_page(2).expect("page 2");
        let back_to_one = list.request_page(1).expect("page 1");

        let late = list.finish_load(to_two, Ok(second_page()), &notifier);
        assert_eq!(late, LoadOutcome::Discarded);
        assert!(list.is_loading());
        assert_eq!(ids(&list), vec![1, 2, 3]);

        let current = list.finish_load(back_to_one, Ok(first_page()), &notifier);
        assert_eq!(current, LoadOutcome::Applied);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn stale_failure_is_discarded_silently() {
        let notifier = RecordingNotifier::default();
        let mut list = UsersListViewModel::new();
        let old = list.begin_load(1);
        let new = list.begin_load(2);

        let outcome = list.finish_load(
            old,
            Err(AppError::Network("late".to_string())),
            &notifier,
        );

        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(notifier.notices().is_empty());
        assert_eq!(list.current_page(), new.page);
    }

    #[tokio::test]
    async fn search_filters_without_refetching() {
        let api = fake_api();
        let mut list = loaded(&api).await;

        list.set_search_term("WEAVER");
        let filtered: Vec<u64> = list.filtered().iter().map(|user| user.id).collect();

        assert_eq!(filtered, vec![2]);
        assert_eq!(list.users().len(), 3);
        assert_eq!(*api.list_calls.borrow(), vec![1]);

        list.set_search_term("");
        assert_eq!(list.filtered().len(), 3);
    }

    #[tokio::test]
    async fn delete_removes_one_user_and_keeps_stale_total() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let confirm = FixedConfirm::yes();
        let notifier = RecordingNotifier::default();

        let outcome = list.delete_user(&api, 2, &confirm, &notifier).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&list), vec![1, 3]);
        assert_eq!(list.total_pages(), 2);
        assert_eq!(*api.delete_calls.borrow(), vec![2]);
        assert_eq!(*api.list_calls.borrow(), vec![1]);
        assert_eq!(
            notifier.messages(NoticeKind::Success),
            vec!["User deleted successfully"]
        );
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let confirm = FixedConfirm::no();

        let outcome = list
            .delete_user(&api, 2, &confirm, &RecordingNotifier::default())
            .await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(confirm.asked(), 1);
        assert!(api.delete_calls.borrow().is_empty());
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let api = fake_api().failing_mutations(AppError::Http {
            status: 500,
            message: "nope".to_string(),
        });
        let mut list = loaded(&api).await;
        let notifier = RecordingNotifier::default();

        let outcome = list
            .delete_user(&api, 2, &FixedConfirm::yes(), &notifier)
            .await;

        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert_eq!(*api.delete_calls.borrow(), vec![2]);
        assert_eq!(notifier.messages(NoticeKind::Error), vec!["Failed to delete user"]);
        assert!(list.last_error().is_some());
    }

    #[tokio::test]
    async fn successful_delete_clears_earlier_delete_error() {
        let api = fake_api();
        let mut list = loaded(&api).await;
        let notifier = RecordingNotifier::default();
        let confirm = FixedConfirm::yes();

        let ticket = list.begin_delete(2, &confirm).expect("confirmed");
        let failed = list.finish_delete(
            ticket,
            Err(AppError::Http {
                status: 500,
                message: "nope".to_string(),
            }),
            &notifier,
        );
        assert!(matches!(failed, DeleteOutcome::Failed(_)));
        assert!(list.last_error().is_some());

        let outcome = list.delete_user(&api, 2, &confirm, &notifier).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&list), vec![1, 3]);
        assert!(list.last_error().is_none());
    }

    #[tokio::test]
    async fn deleting_last_user_on_page_does_not_navigate() {
        let api = fake_api();
        let mut list = UsersListViewModel::new();
        let notifier = RecordingNotifier::default();
        list.load_page(&api, 2, &notifier).await;

        for id in [7, 8] {
            list.delete_user(&api, id, &FixedConfirm::yes(), &notifier)
                .await;
        }

        assert!(list.users().is_empty());
        assert_eq!(list.page(), 2);
        assert_eq!(list.total_pages(), 2);
        assert_eq!(*api.list_calls.borrow(), vec![2]);
    }

    #[test]
    fn only_one_delete_at_a_time() {
        let mut list = UsersListViewModel::new();
        let confirm = FixedConfirm::yes();

        let first = list.begin_delete(1, &confirm);
        assert!(first.is_some());
        assert!(list.is_deleting(1));
        assert!(list.begin_delete(2, &confirm).is_none());

        let notifier = RecordingNotifier::default();
        list.finish_delete(first.expect("ticket"), Ok(()), &notifier);
        assert!(!list.is_deleting(1));
        assert!(list.begin_delete(2, &confirm).is_some());
    }
}
