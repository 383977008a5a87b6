//! Process-local `UserStore` used when no database is configured.
//!
//! Records live in insertion order behind an async lock. Listings sort by
//! `created_at` descending with a stable sort, so records sharing a timestamp
//! keep their insertion order. Email uniqueness is enforced on insert and
//! update, matching the database's unique index (case-sensitive). Patches
//! are applied under the write lock, so concurrent partial updates never
//! overwrite each other's fields.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use crate::domain::ports::{UserFilter, UserStore, UserStoreError};
use crate::domain::{User, UserField, UserId, UserPatch};

/// In-memory implementation of the [`UserStore`] port.
///
/// Clones share the same underlying collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &UserFilter, user: &User) -> bool {
    match filter {
        UserFilter::All => true,
        UserFilter::Matching(pattern) => UserField::ALL
            .iter()
            .any(|field| pattern.is_match(user.field(*field))),
    }
}

fn newest_first(users: &[User], filter: &UserFilter) -> Vec<User> {
    let mut selected: Vec<User> = users
        .iter()
        .filter(|user| matches(filter, user))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}

fn email_taken(users: &[User], email: &str, except: Option<&UserId>) -> bool {
    users
        .iter()
        .any(|user| user.email == email && Some(&user.id) != except)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_page(
        &self,
        filter: &UserFilter,
        request: PageRequest,
    ) -> Result<Page<User>, UserStoreError> {
        let users = self.users.read().await;
        let selected = newest_first(&users, filter);
        let total = selected.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = selected.into_iter().skip(skip).take(take).collect();
        Ok(Page::new(items, request, total))
    }

    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(newest_first(&users, &UserFilter::All))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| &user.id == id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(UserStoreError::duplicate_email());
        }
        if users.iter().any(|existing| existing.id == user.id) {
            return Err(UserStoreError::query(format!(
                "user {} already exists",
                user.id
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError> {
        let mut users = self.users.write().await;
        let new_email = patch.value(UserField::Email);
        if new_email.is_some_and(|email| email_taken(&users, email, Some(id))) {
            return Err(UserStoreError::duplicate_email());
        }
        Ok(users.iter_mut().find(|user| &user.id == id).map(|user| {
            user.apply(patch, now);
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserStoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| &user.id != id);
        Ok(users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory store.

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{SearchMode, SearchPattern, UserDraft, UserFields};

    #[fixture]
    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn user(name: &str, email: &str, role: &str, created_at: DateTime<Utc>) -> User {
        let draft = UserDraft::try_from_fields(UserFields {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some("555-0100".into()),
            address: Some("1 Main St".into()),
            role: Some(role.into()),
        })
        .expect("valid fixture user");
        User::create(draft, created_at)
    }

    async fn seeded(epoch: DateTime<Utc>) -> InMemoryUserStore {
        let store = InMemoryUserStore::new();
        for (offset, (name, email, role)) in [
            ("Ada Lovelace", "ada@example.com", "Admin"),
            ("Grace Hopper", "grace@example.com", "User"),
            ("Alan Turing", "alan@example.org", "User"),
        ]
        .into_iter()
        .enumerate()
        {
            let created = epoch + Duration::minutes(i64::try_from(offset).expect("small"));
            store
                .insert(&user(name, email, role, created))
                .await
                .expect("insert fixture");
        }
        store
    }

    #[rstest]
    #[tokio::test]
    async fn pages_are_newest_first(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let page = store
            .find_page(&UserFilter::All, PageRequest::from_raw(Some("1"), Some("2")))
            .await
            .expect("page");
        let names: Vec<&str> = page.items().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alan Turing", "Grace Hopper"]);
        assert_eq!(page.total_items(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn pages_past_the_end_are_empty(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let page = store
            .find_page(&UserFilter::All, PageRequest::from_raw(Some("9"), Some("2")))
            .await
            .expect("page");
        assert!(page.items().is_empty());
        assert_eq!(page.current_page(), 9);
    }

    #[rstest]
    #[case("example.org", 1)]
    #[case("USER", 2)]
    #[case("^a", 2)]
    #[case("nobody", 0)]
    #[tokio::test]
    async fn search_matches_any_field(
        epoch: DateTime<Utc>,
        #[case] query: &str,
        #[case] expected: u64,
    ) {
        let store = seeded(epoch).await;
        let pattern = SearchPattern::parse(Some(query), SearchMode::Regex).expect("pattern");
        let page = store
            .find_page(&UserFilter::Matching(pattern), PageRequest::default())
            .await
            .expect("page");
        assert_eq!(page.total_items(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let err = store
            .insert(&user("Imposter", "ada@example.com", "User", epoch))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserStoreError::DuplicateEmail);
    }

    fn patch(fields: UserFields) -> UserPatch {
        UserPatch::try_from_fields(fields).expect("valid patch")
    }

    async fn find_named(store: &InMemoryUserStore, name: &str) -> User {
        store
            .find_all()
            .await
            .expect("all")
            .into_iter()
            .find(|u| u.name == name)
            .expect("fixture user present")
    }

    #[rstest]
    #[tokio::test]
    async fn update_cannot_steal_another_email(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let grace = find_named(&store, "Grace Hopper").await;
        let steal = patch(UserFields {
            email: Some("ada@example.com".into()),
            ..UserFields::default()
        });
        assert_eq!(
            store.update(&grace.id, &steal, epoch).await,
            Err(UserStoreError::DuplicateEmail)
        );

        let keep = patch(UserFields {
            email: Some("grace@example.com".into()),
            ..UserFields::default()
        });
        let updated = store
            .update(&grace.id, &keep, epoch)
            .await
            .expect("own email is fine")
            .expect("grace present");
        assert_eq!(updated.email, "grace@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn update_writes_only_patched_fields(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let alan = find_named(&store, "Alan Turing").await;
        let later = epoch + Duration::hours(1);

        let updated = store
            .update(
                &alan.id,
                &patch(UserFields {
                    role: Some("Admin".into()),
                    ..UserFields::default()
                }),
                later,
            )
            .await
            .expect("update")
            .expect("alan present");

        assert_eq!(updated.role, "Admin");
        assert_eq!(updated.email, alan.email);
        assert_eq!(updated.created_at, alan.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(store.find_by_id(&alan.id).await, Ok(Some(updated)));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_record_is_none(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let result = store
            .update(&UserId::random(), &UserPatch::default(), epoch)
            .await;
        assert_eq!(result, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed(epoch: DateTime<Utc>) {
        let store = seeded(epoch).await;
        let victim = store.find_all().await.expect("all").remove(0);
        assert_eq!(store.delete(&victim.id).await, Ok(true));
        assert_eq!(store.delete(&victim.id).await, Ok(false));
        assert_eq!(store.find_by_id(&victim.id).await, Ok(None));
        assert!(!store.is_empty().await.expect("probe"));
    }
}
