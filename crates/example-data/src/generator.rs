//! Deterministic user generation.
//!
//! A single `ChaCha8Rng` seeded from the caller's `u64` drives every choice,
//! so output depends only on the seed and the requested count.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StreetName};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::ExampleUser;
use crate::validation::{is_valid_email, is_valid_phone};

/// Role labels assigned to generated users.
pub const EXAMPLE_ROLES: [&str; 4] = ["Admin", "Editor", "User", "Viewer"];

const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

/// Maximum number of attempts to generate a usable name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Maximum number of numbered variants tried for a colliding email.
const MAX_EMAIL_ATTEMPTS: usize = 1000;

/// Generates `count` example users from `seed`.
///
/// # Errors
///
/// Returns [`GenerationError`] if the faker keeps producing names that cannot
/// form an email address, or if a unique email cannot be found.
///
/// # Example
///
/// ```
/// use example_data::{EXAMPLE_ROLES, generate_example_users};
///
/// let users = generate_example_users(7, 3).expect("generated");
/// assert_eq!(users.len(), 3);
/// assert!(users.iter().all(|user| EXAMPLE_ROLES.contains(&user.role.as_str())));
/// ```
pub fn generate_example_users(
    seed: u64,
    count: usize,
) -> Result<Vec<ExampleUser>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut taken = HashSet::with_capacity(count);
    let mut users = Vec::with_capacity(count);

    for _ in 0..count {
        let user = generate_single_user(&mut rng, &mut taken)?;
        users.push(user);
    }

    Ok(users)
}

fn generate_single_user(
    rng: &mut ChaCha8Rng,
    taken: &mut HashSet<String>,
) -> Result<ExampleUser, GenerationError> {
    let (first, last) = generate_name(rng)?;
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let email = unique_email(&first, &last, domain, taken)?;
    let phone = generate_phone(rng);
    let address = generate_address(rng);
    let role = EXAMPLE_ROLES.choose(rng).copied().unwrap_or("User");

    Ok(ExampleUser {
        name: format!("{first} {last}"),
        email,
        phone,
        address,
        role: role.to_owned(),
    })
}

/// Lower-case ASCII letters and digits of `part`.
fn email_token(part: &str) -> String {
    part.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Draws first and last names until both yield a non-empty email token.
fn generate_name(rng: &mut ChaCha8Rng) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        if !email_token(&first).is_empty() && !email_token(&last).is_empty() {
            return Ok((first, last));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// `first.last@domain`, numbered from 2 upwards on collision.
fn unique_email(
    first: &str,
    last: &str,
    domain: &str,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    let local = format!("{}.{}", email_token(first), email_token(last));
    for attempt in 1..=MAX_EMAIL_ATTEMPTS {
        let candidate = if attempt == 1 {
            format!("{local}@{domain}")
        } else {
            format!("{local}{attempt}@{domain}")
        };
        if is_valid_email(&candidate) && taken.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::EmailGenerationFailed {
        max_attempts: MAX_EMAIL_ATTEMPTS,
    })
}

/// North American style number in the reserved 555-01xx block.
fn generate_phone(rng: &mut ChaCha8Rng) -> String {
    let area: u16 = rng.random_range(200..=989);
    let line: u16 = rng.random_range(100..=199);
    let phone = format!("+1 ({area}) 555-0{line}");
    debug_assert!(is_valid_phone(&phone));
    phone
}

fn generate_address(rng: &mut ChaCha8Rng) -> String {
    let number: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);
    format!("{number} {street}, {city}")
}
