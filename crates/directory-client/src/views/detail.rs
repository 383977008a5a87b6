//! Read-only page for one user.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use crate::api::DirectoryApi;
use crate::model::User;
use crate::notice::Notices;
use crate::routes::{Route, navbar};

const FETCH_FAILED: &str = "Failed to fetch user";

/// Long en-US date and time, e.g. `October 16, 2026 at 02:30 PM`.
#[must_use]
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// View model of the detail page.
pub struct DetailView<A: ?Sized> {
    api: Arc<A>,
    id: String,
    user: Option<User>,
    notices: Notices,
}

impl<A> DetailView<A>
where
    A: DirectoryApi + ?Sized,
{
    /// Page for user `id`; nothing is shown until [`Self::load`] succeeds.
    #[must_use]
    pub fn new(api: Arc<A>, id: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            user: None,
            notices: Notices::new(),
        }
    }

    /// The loaded record.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Notices raised by this view.
    pub const fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Fetch the record. Returns the route to leave for when it cannot be
    /// fetched.
    pub async fn load(&mut self) -> Option<Route> {
        match self.api.get_user(&self.id).await {
            Ok(user) => {
                self.user = Some(user);
                None
            }
            Err(err) => {
                self.notices.error(err.notice_text(FETCH_FAILED));
                Some(Route::List)
            }
        }
    }

    /// Where the "Edit User" action leads.
    #[must_use]
    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id.clone())
    }

    /// Labelled values shown under the name, with `Created At` in local
    /// time.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        self.user.as_ref().map_or_else(Vec::new, |user| {
            vec![
                ("Email Address", user.email.clone()),
                ("Phone Number", user.phone.clone()),
                ("Address", user.address.clone()),
                ("Role", user.role.clone()),
                (
                    "Created At",
                    format_timestamp(&user.created_at.with_timezone(&Local)),
                ),
            ]
        })
    }

    /// Text rendering of the page; empty until loaded.
    #[must_use]
    pub fn render(&self) -> String {
        let Some(user) = &self.user else {
            return String::new();
        };
        let mut out = format!(
            "{}\n\n{}\n[{}]\n\n",
            navbar(&Route::View(self.id.clone())),
            user.name,
            user.role
        );
        for (label, value) in self.fields() {
            out.push_str(&format!("{label}: {value}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use rstest::rstest;

    use super::*;
    use crate::api::MockDirectoryApi;
    use crate::error::ClientError;
    use crate::notice::NoticeKind;

    fn ada() -> User {
        let created_at = Utc
            .with_ymd_and_hms(2026, 10, 16, 14, 30, 0)
            .single()
            .expect("valid timestamp");
        User {
            id: "abc".to_owned(),
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: "+1 555 0100".to_owned(),
            address: "London".to_owned(),
            role: "Admin".to_owned(),
            created_at,
            updated_at: created_at,
        }
    }

    #[rstest]
    #[case(2026, 10, 16, 14, 30, "October 16, 2026 at 02:30 PM")]
    #[case(2024, 1, 2, 3, 4, "January 2, 2024 at 03:04 AM")]
    #[case(2024, 12, 31, 0, 0, "December 31, 2024 at 12:00 AM")]
    fn timestamps_use_the_long_us_format(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: &str,
    ) {
        let at = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_timestamp(&at), expected);
    }

    #[rstest]
    fn timestamps_follow_the_given_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let at = ada().created_at.with_timezone(&offset);
        assert_eq!(format_timestamp(&at), "October 16, 2026 at 04:30 PM");
    }

    #[rstest]
    #[tokio::test]
    async fn loaded_users_expose_labelled_fields() {
        let mut api = MockDirectoryApi::new();
        api.expect_get_user()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(ada()));
        let mut view = DetailView::new(Arc::new(api), "abc");
        assert!(view.render().is_empty());

        assert_eq!(view.load().await, None);

        let labels: Vec<&str> = view.fields().into_iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            ["Email Address", "Phone Number", "Address", "Role", "Created At"]
        );
        assert_eq!(view.edit_route(), Route::Edit("abc".to_owned()));
        assert!(view.render().contains("Ada Lovelace\n[Admin]"));
    }

    #[rstest]
    #[case(Some("User not found"), "User not found")]
    #[case(None, "Failed to fetch user")]
    #[tokio::test]
    async fn missing_users_send_the_reader_back(
        #[case] message: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mut api = MockDirectoryApi::new();
        api.expect_get_user().times(1).returning(move |_| {
            Err(ClientError::Status {
                status: 404,
                message: message.map(str::to_owned),
            })
        });
        let mut view = DetailView::new(Arc::new(api), "gone");

        assert_eq!(view.load().await, Some(Route::List));
        assert!(view.user().is_none());
        let notice = view.notices_mut().latest().cloned().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, expected);
    }
}
