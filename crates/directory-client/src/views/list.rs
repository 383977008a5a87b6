//! Paginated, searchable users list.
//!
//! Every fetch takes a fresh sequence number; a response is applied only if
//! no newer fetch was issued in the meantime. Query edits are debounced:
//! the search runs once the query has been left alone for
//! [`SEARCH_DEBOUNCE`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::api::DirectoryApi;
use crate::error::ClientError;
use crate::model::{User, UserPage};
use crate::notice::Notices;
use crate::routes::{Route, navbar};
use crate::views::table::{render_table, search_bar};

/// Users requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Quiet period after the last query edit before searching.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// File name the CSV export is saved under.
pub const EXPORT_FILE_NAME: &str = "users_export.csv";

/// Question put to the user before deleting.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

const FETCH_FAILED: &str = "Failed to fetch users";
const DELETE_FAILED: &str = "Failed to delete user";
const EXPORT_FAILED: &str = "Failed to export CSV";
const DELETED: &str = "User deleted successfully";
const EXPORTED: &str = "CSV file downloaded successfully";

/// Asks the user to confirm a deletion.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmDelete: Send + Sync {
    /// Returns `true` to go ahead with the deletion.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always agrees, for non-interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl ConfirmDelete for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Everything the list renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    /// Users on the current page.
    pub users: Vec<User>,
    /// Page shown, starting at 1.
    pub current_page: u32,
    /// Pages available for the current query.
    pub total_pages: u32,
    /// Text in the search bar.
    pub search_query: String,
    /// A fetch is in flight.
    pub loading: bool,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            current_page: 1,
            total_pages: 1,
            search_query: String::new(),
            loading: true,
        }
    }
}

/// A fetch that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    sequence: u64,
    page: u32,
    query: String,
}

impl FetchTicket {
    /// Page this fetch asks for.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Run the fetch: search when the trimmed query is non-empty, list
    /// otherwise. The untrimmed query is what gets sent.
    ///
    /// # Errors
    ///
    /// Whatever the API returns.
    pub async fn execute<A>(&self, api: &A) -> Result<UserPage, ClientError>
    where
        A: DirectoryApi + ?Sized,
    {
        if self.query.trim().is_empty() {
            api.list_users(self.page, PAGE_SIZE).await
        } else {
            api.search_users(&self.query, self.page, PAGE_SIZE).await
        }
    }
}

/// View model of the users list.
pub struct ListView<A: ?Sized> {
    api: Arc<A>,
    state: ListViewState,
    notices: Notices,
    issued: u64,
    search_due_at: Option<Instant>,
}

impl<A> ListView<A>
where
    A: DirectoryApi + ?Sized,
{
    /// A list that has not loaded anything yet.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: ListViewState::default(),
            notices: Notices::new(),
            issued: 0,
            search_due_at: None,
        }
    }

    /// Current render state.
    #[must_use]
    pub const fn state(&self) -> &ListViewState {
        &self.state
    }

    /// Notices raised by this view.
    pub const fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Initial load: first page, no query.
    pub async fn load(&mut self) {
        self.fetch(1).await;
    }

    /// Issue a fetch for `page` with the current query.
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.issued += 1;
        self.state.loading = true;
        FetchTicket {
            sequence: self.issued,
            page,
            query: self.state.search_query.clone(),
        }
    }

    /// Apply the outcome of `ticket`. Returns `false` when a newer fetch was
    /// issued and the outcome was discarded.
    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<UserPage, ClientError>,
    ) -> bool {
        if ticket.sequence != self.issued {
            debug!(
                sequence = ticket.sequence,
                latest = self.issued,
                "discarding stale users page"
            );
            return false;
        }

        self.state.loading = false;
        match outcome {
            Ok(page) => {
                self.state.users = page.users;
                self.state.current_page = page.current_page;
                self.state.total_pages = page.total_pages;
            }
            Err(err) => {
                debug!(error = %err, "users fetch failed");
                self.notices.error(err.notice_text(FETCH_FAILED));
            }
        }
        true
    }

    async fn fetch(&mut self, page: u32) {
        let ticket = self.begin_fetch(page);
        let outcome = ticket.execute(self.api.as_ref()).await;
        self.finish_fetch(&ticket, outcome);
    }

    /// Move to `page` keeping the current query.
    pub async fn change_page(&mut self, page: u32) {
        self.state.current_page = page;
        self.fetch(page).await;
    }

    /// Replace the search text and restart the debounce window.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
        self.search_due_at = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    /// When the pending search will run, if one is pending.
    #[must_use]
    pub const fn search_due_at(&self) -> Option<Instant> {
        self.search_due_at
    }

    /// Run the pending search if its quiet period has elapsed. Returns
    /// `true` when a fetch was made.
    pub async fn poll_search(&mut self) -> bool {
        match self.search_due_at {
            Some(due) if Instant::now() >= due => {
                self.search_due_at = None;
                self.fetch(1).await;
                true
            }
            _ => false,
        }
    }

    /// Wait out the debounce window, then run the pending search.
    pub async fn settle_search(&mut self) {
        if let Some(due) = self.search_due_at {
            tokio::time::sleep_until(due).await;
            self.poll_search().await;
        }
    }

    /// Delete `user_id` once `confirm` agrees, then reload the current page.
    /// Returns `true` when the user was deleted.
    pub async fn delete_user(&mut self, user_id: &str, confirm: &dyn ConfirmDelete) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        match self.api.delete_user(user_id).await {
            Ok(_) => {
                info!(user_id, "user deleted");
                self.notices.success(DELETED);
                self.fetch(self.state.current_page).await;
                true
            }
            Err(err) => {
                self.notices.error(err.notice_text(DELETE_FAILED));
                false
            }
        }
    }

    /// Download the CSV export into `dir` as [`EXPORT_FILE_NAME`].
    pub async fn export_to(&mut self, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        match self.write_export(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "export saved");
                self.notices.success(EXPORTED);
                Some(path)
            }
            Err(err) => {
                self.notices.error(err.notice_text(EXPORT_FAILED));
                None
            }
        }
    }

    async fn write_export(&self, path: &Path) -> Result<(), ClientError> {
        let bytes = self.api.export_csv().await?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Text rendering of the list screen.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n\nUsers List\n{}\n\n",
            navbar(&Route::List),
            search_bar(&self.state.search_query)
        );
        if self.state.loading {
            out.push_str("Loading...\n");
            return out;
        }
        out.push_str(&render_table(&self.state.users));
        if self.state.total_pages > 1 {
            out.push_str(&format!(
                "\nPage {} of {}\n",
                self.state.current_page, self.state.total_pages
            ));
        }
        out
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
