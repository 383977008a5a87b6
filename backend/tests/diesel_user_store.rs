//! Integration tests for `DieselUserStore` against embedded PostgreSQL.
//!
//! Each test gets its own migrated database. Steps run on a Tokio runtime
//! owned by the test context, so database provisioning and teardown stay
//! outside of any async context.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use pagination::PageRequest;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use directory_backend::domain::ports::{
    UserFilter, UserStore, UserStoreError, UsersCommand, UsersQuery,
};
use directory_backend::domain::{
    SearchMode, SearchPattern, User, UserDirectoryService, UserDraft, UserFields, UserId,
    UserPatch,
};
use directory_backend::outbound::export::CsvUserExportEncoder;
use directory_backend::outbound::persistence::{
    DbPool, DieselUserStore, PoolConfig, run_pending_migrations,
};

mod support;

use support::{handle_cluster_setup_failure, temporary_database};

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

struct TestContext {
    store: DieselUserStore,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = temporary_database()?;
    let url = database.url().to_string();

    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(&url).with_max_size(2))
            .await
            .map_err(|err| err.to_string())
    })?;

    Ok(TestContext {
        store: DieselUserStore::new(pool),
        runtime,
        _database: database,
    })
}

#[fixture]
fn diesel_store() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn fields(name: &str, email: &str, phone: &str, address: &str, role: &str) -> UserFields {
    UserFields {
        name: Some(name.into()),
        email: Some(email.into()),
        phone: Some(phone.into()),
        address: Some(address.into()),
        role: Some(role.into()),
    }
}

fn user_at(fields: UserFields, created_at: DateTime<Utc>) -> User {
    User::create(
        UserDraft::try_from_fields(fields).expect("fixture fields are valid"),
        created_at,
    )
}

fn directory() -> [UserFields; 3] {
    [
        fields(
            "Ada Lovelace",
            "ada@example.com",
            "+44 20 7946 0000",
            "12 St James's Square, London",
            "Admin",
        ),
        fields(
            "Grace Hopper",
            "grace@navy.mil",
            "+1 (555) 010-2030",
            "1 Navy Yard, Arlington",
            "User",
        ),
        fields(
            "Alan Turing",
            "alan@example.org",
            "+44 161 496 0000",
            "Bletchley Park",
            "Viewer",
        ),
    ]
}

/// Inserts the fixture directory one minute apart, oldest first.
async fn seed(store: &DieselUserStore) -> Vec<User> {
    let mut stored = Vec::new();
    for (minutes, entry) in (0_i64..).zip(directory()) {
        let user = user_at(entry, epoch() + Duration::minutes(minutes));
        stored.push(store.insert(&user).await.expect("insert fixture"));
    }
    stored
}

fn sorted_names(users: &[User]) -> Vec<String> {
    let mut names: Vec<String> = users.iter().map(|user| user.name.clone()).collect();
    names.sort();
    names
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn pages_are_newest_first_with_totals(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: pages_are_newest_first_with_totals skipped");
        return;
    };

    ctx.runtime.block_on(async {
        seed(&ctx.store).await;

        let first = ctx
            .store
            .find_page(&UserFilter::All, PageRequest::from_raw(Some("1"), Some("2")))
            .await
            .expect("first page");
        let names: Vec<&str> = first.items().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alan Turing", "Grace Hopper"]);
        assert_eq!(first.total_items(), 3);
        assert_eq!(first.total_pages(), 2);

        let second = ctx
            .store
            .find_page(&UserFilter::All, PageRequest::from_raw(Some("2"), Some("2")))
            .await
            .expect("second page");
        let names: Vec<&str> = second.items().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ada Lovelace"]);

        let all = ctx.store.find_all().await.expect("all users");
        assert_eq!(all.first().map(|u| u.name.as_str()), Some("Alan Turing"));
        assert!(!ctx.store.is_empty().await.expect("emptiness check"));
    });
}

#[rstest]
#[case::name(SearchMode::Regex, "lovelace", &["Ada Lovelace"])]
#[case::email(SearchMode::Regex, r"navy\.mil$", &["Grace Hopper"])]
#[case::phone(SearchMode::Regex, r"^\+44", &["Ada Lovelace", "Alan Turing"])]
#[case::address(SearchMode::Regex, "BLETCHLEY", &["Alan Turing"])]
#[case::role(SearchMode::Regex, "^user$", &["Grace Hopper"])]
#[case::regex_dot(SearchMode::Regex, "St.", &["Ada Lovelace"])]
#[case::literal_dot(SearchMode::Literal, "St.", &[])]
#[case::literal_plus(SearchMode::Literal, "+44", &["Ada Lovelace", "Alan Turing"])]
#[case::literal_parens(SearchMode::Literal, "(555)", &["Grace Hopper"])]
fn search_matches_any_column(
    diesel_store: Option<TestContext>,
    #[case] mode: SearchMode,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: search_matches_any_column skipped");
        return;
    };

    let pattern = SearchPattern::parse(Some(query), mode).expect("valid pattern");
    let page = ctx.runtime.block_on(async {
        seed(&ctx.store).await;
        ctx.store
            .find_page(&UserFilter::Matching(pattern), PageRequest::default())
            .await
            .expect("search runs")
    });

    assert_eq!(sorted_names(page.items()), expected);
    assert_eq!(page.total_items(), expected.len() as u64);
}

#[rstest]
fn unique_email_violations_are_duplicate_email(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: unique_email_violations_are_duplicate_email skipped");
        return;
    };

    ctx.runtime.block_on(async {
        let stored = seed(&ctx.store).await;
        let imposter = user_at(
            fields("Imposter", "ada@example.com", "1", "Nowhere", "User"),
            epoch(),
        );
        assert_eq!(
            ctx.store.insert(&imposter).await,
            Err(UserStoreError::DuplicateEmail)
        );

        let grace = stored.get(1).expect("grace seeded");
        let steal = UserPatch::try_from_fields(UserFields {
            email: Some("ada@example.com".into()),
            ..UserFields::default()
        })
        .expect("valid patch");
        assert_eq!(
            ctx.store.update(&grace.id, &steal, epoch()).await,
            Err(UserStoreError::DuplicateEmail)
        );
        assert_eq!(
            ctx.store.find_by_id(&grace.id).await,
            Ok(Some(grace.clone()))
        );
    });
}

#[rstest]
fn missing_ids_are_reported(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: missing_ids_are_reported skipped");
        return;
    };

    ctx.runtime.block_on(async {
        seed(&ctx.store).await;
        let missing = UserId::random();
        assert_eq!(ctx.store.find_by_id(&missing).await, Ok(None));
        assert_eq!(
            ctx.store
                .update(&missing, &UserPatch::default(), epoch())
                .await,
            Ok(None)
        );
        assert_eq!(ctx.store.delete(&missing).await, Ok(false));
    });
}

#[rstest]
fn delete_removes_the_record(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_record skipped");
        return;
    };

    ctx.runtime.block_on(async {
        let stored = seed(&ctx.store).await;
        let ada = stored.first().expect("ada seeded");
        assert_eq!(ctx.store.delete(&ada.id).await, Ok(true));
        assert_eq!(ctx.store.find_by_id(&ada.id).await, Ok(None));
        assert_eq!(ctx.store.delete(&ada.id).await, Ok(false));
    });
}

#[rstest]
fn service_writes_return_the_stored_record(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: service_writes_return_the_stored_record skipped");
        return;
    };

    let service = UserDirectoryService::new(
        Arc::new(ctx.store.clone()),
        Arc::new(CsvUserExportEncoder),
        Arc::new(DefaultClock),
    );
    ctx.runtime.block_on(async {
        let [ada, ..] = directory();
        let created = service.create_user(ada).await.expect("create");
        let fetched = service.get_user(&created.id).await.expect("get");
        assert_eq!(created, fetched);

        let updated = service
            .update_user(
                &created.id,
                UserFields {
                    role: Some("User".into()),
                    ..UserFields::default()
                },
            )
            .await
            .expect("update");
        let fetched = service.get_user(&created.id).await.expect("get");
        assert_eq!(updated, fetched);
        assert_eq!(fetched.role, "User");
        assert_eq!(fetched.email, created.email);
        assert_eq!(fetched.created_at, created.created_at);
    });
}

#[rstest]
fn concurrent_partial_updates_keep_every_field(diesel_store: Option<TestContext>) {
    let Some(ctx) = diesel_store else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_partial_updates_keep_every_field skipped");
        return;
    };

    ctx.runtime.block_on(async {
        let stored = seed(&ctx.store).await;
        let grace = stored.get(1).expect("grace seeded");
        let role = UserPatch::try_from_fields(UserFields {
            role: Some("Admin".into()),
            ..UserFields::default()
        })
        .expect("valid patch");
        let phone = UserPatch::try_from_fields(UserFields {
            phone: Some("999".into()),
            ..UserFields::default()
        })
        .expect("valid patch");

        let (first, second) = tokio::join!(
            ctx.store.update(&grace.id, &role, epoch()),
            ctx.store.update(&grace.id, &phone, epoch()),
        );
        first.expect("role update").expect("grace present");
        second.expect("phone update").expect("grace present");

        let current = ctx
            .store
            .find_by_id(&grace.id)
            .await
            .expect("fetch")
            .expect("grace present");
        assert_eq!(current.role, "Admin");
        assert_eq!(current.phone, "999");
        assert_eq!(current.name, grace.name);
    });
}
