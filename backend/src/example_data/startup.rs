//! Startup seeding orchestration.
//!
//! Seeding only runs against an empty store, so restarting a server with
//! seeding enabled never duplicates users or collides on email.

use chrono::Duration;
use example_data::{ExampleUser, GenerationError, generate_example_users};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserDraft, UserFields, UserValidationError};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The generator could not produce a batch.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated user failed directory validation.
    #[error("generated user {email} is invalid: {source}")]
    InvalidUser {
        email: String,
        #[source]
        source: UserValidationError,
    },
    /// The store rejected a read or write.
    #[error("example data store error: {0}")]
    Store(#[from] UserStoreError),
}

/// What startup seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding is switched off.
    Disabled,
    /// The store already held users; nothing was written.
    AlreadyPopulated,
    /// `user_count` users were inserted.
    Applied { user_count: usize },
}

fn to_draft(user: ExampleUser) -> Result<UserDraft, StartupSeedingError> {
    let email = user.email.clone();
    UserDraft::try_from_fields(UserFields {
        name: Some(user.name),
        email: Some(user.email),
        phone: Some(user.phone),
        address: Some(user.address),
        role: Some(user.role),
    })
    .map_err(|source| StartupSeedingError::InvalidUser { email, source })
}

/// Populate an empty store with generated users when enabled.
///
/// Users are stamped one second apart, newest first in generation order, so
/// listings show them in a stable order whatever the store.
///
/// # Examples
///
/// ```rust,no_run
/// use directory_backend::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use directory_backend::outbound::memory::InMemoryUserStore;
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings { enabled: true, seed: Some(42), count: Some(10) };
/// let store = InMemoryUserStore::new();
/// let outcome = seed_example_data_on_startup(&settings, &store, &DefaultClock).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup<S>(
    settings: &ExampleDataSettings,
    store: &S,
    clock: &dyn Clock,
) -> Result<SeedOutcome, StartupSeedingError>
where
    S: UserStore + ?Sized,
{
    if !settings.enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(SeedOutcome::Disabled);
    }

    if !store.is_empty().await? {
        warn!(
            seed = settings.seed(),
            "example data seeding enabled but the store already holds users; skipping"
        );
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let generated = generate_example_users(settings.seed(), settings.count())?;
    let now = clock.utc();
    let mut inserted = 0_usize;
    for (offset, example) in generated.into_iter().enumerate() {
        let draft = to_draft(example)?;
        let seconds = i64::try_from(offset).unwrap_or(i64::MAX);
        let created_at = now - Duration::seconds(seconds);
        store.insert(&User::create(draft, created_at)).await?;
        inserted += 1;
    }

    info!(
        seed = settings.seed(),
        user_count = inserted,
        "example data seeding applied"
    );
    Ok(SeedOutcome::Applied {
        user_count: inserted,
    })
}
