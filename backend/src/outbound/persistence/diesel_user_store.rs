//! PostgreSQL-backed `UserStore` implementation using Diesel ORM.
//!
//! Search uses PostgreSQL's case-insensitive regex operator `~*` across every
//! user-supplied column. The unique constraint on `email` is reported as
//! [`UserStoreError::DuplicateEmail`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{AsExprOf, Or, count_star};
use diesel::expression::AsExpression;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{UserFilter, UserStore, UserStoreError};
use crate::domain::{User, UserId, UserPatch};

use super::models::{NewUserRow, UserPatchChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

diesel::infix_operator!(RegexIMatch, " ~* ", backend: Pg);

/// Adds `~*` to text expressions.
trait RegexIMatchExt: Expression<SqlType = Text> + Sized {
    fn regex_imatch<T>(self, pattern: T) -> RegexIMatch<Self, T::Expression>
    where
        T: AsExpression<Text>,
    {
        RegexIMatch::new(self, pattern.as_expression())
    }
}

impl<E> RegexIMatchExt for E where E: Expression<SqlType = Text> {}

type ColumnMatch<C> = RegexIMatch<C, AsExprOf<String, Text>>;

type SearchCondition = Or<
    Or<
        Or<Or<ColumnMatch<users::name>, ColumnMatch<users::email>>, ColumnMatch<users::phone>>,
        ColumnMatch<users::address>,
    >,
    ColumnMatch<users::role>,
>;

/// `~*` against every user-supplied column, OR-ed together.
fn search_condition(source: &str) -> SearchCondition {
    users::name
        .regex_imatch(source.to_owned())
        .or(users::email.regex_imatch(source.to_owned()))
        .or(users::phone.regex_imatch(source.to_owned()))
        .or(users::address.regex_imatch(source.to_owned()))
        .or(users::role.regex_imatch(source.to_owned()))
}

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserStoreError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserStoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => UserStoreError::query(info.message()),
        other => UserStoreError::query(other.to_string()),
    }
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_page(
        &self,
        filter: &UserFilter,
        request: PageRequest,
    ) -> Result<Page<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut count_query = users::table.select(count_star()).into_boxed();
        let mut rows_query = users::table
            .select(UserRow::as_select())
            .order(users::created_at.desc())
            .offset(to_sql_bound(request.offset()))
            .limit(to_sql_bound(request.limit()))
            .into_boxed();
        if let UserFilter::Matching(pattern) = filter {
            count_query = count_query.filter(search_condition(pattern.as_str()));
            rows_query = rows_query.filter(search_condition(pattern.as_str()));
        }

        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<UserRow> = rows_query.load(&mut conn).await.map_err(map_diesel_error)?;

        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(
            rows.into_iter().map(User::from).collect(),
            request,
            total,
        ))
    }

    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: &User) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(User::from(row))
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(id.as_uuid()))
            .set(UserPatchChangeset::new(patch, now))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Query-shape and error-mapping coverage that needs no live database.

    use diesel::debug_query;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;
    use crate::domain::{SearchMode, SearchPattern, UserFields};

    struct StubInfo(&'static str);

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo(message)))
    }

    #[rstest]
    fn unique_violation_is_duplicate_email() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
        ));
        assert_eq!(err, UserStoreError::DuplicateEmail);
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection",
        ));
        assert_eq!(
            err,
            UserStoreError::connection("server closed the connection")
        );
    }

    #[rstest]
    fn other_database_errors_keep_the_message() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::Unknown,
            "invalid regular expression: parentheses () not balanced",
        ));
        assert!(err.to_string().contains("parentheses () not balanced"));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserStoreError::connection("timed out"));
    }

    #[rstest]
    #[case(SearchMode::Regex, "ada")]
    #[case(SearchMode::Literal, "a.b")]
    fn search_condition_ors_every_column(#[case] mode: SearchMode, #[case] query: &str) {
        let pattern = SearchPattern::parse(Some(query), mode).expect("pattern");
        let query = users::table
            .select(users::id)
            .into_boxed()
            .filter(search_condition(pattern.as_str()));
        let sql = debug_query::<Pg, _>(&query).to_string();
        for column in ["name", "email", "phone", "address", "role"] {
            assert!(
                sql.contains(&format!("\"users\".\"{column}\" ~* $")),
                "missing {column} in {sql}"
            );
        }
    }

    #[rstest]
    fn partial_update_sets_only_patched_columns() {
        let patch = UserPatch::try_from_fields(UserFields {
            role: Some("User".into()),
            ..UserFields::default()
        })
        .expect("valid patch");
        let id = UserId::random();
        let query = diesel::update(users::table.find(id.as_uuid()))
            .set(UserPatchChangeset::new(&patch, Utc::now()))
            .returning(UserRow::as_returning());
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"role\" = $"), "role missing in {sql}");
        assert!(sql.contains("\"updated_at\" = $"), "updated_at missing in {sql}");
        for column in ["name", "email", "phone", "address"] {
            assert!(
                !sql.contains(&format!("\"{column}\" = $")),
                "{column} must not be written: {sql}"
            );
        }
        assert!(sql.contains("RETURNING"), "missing RETURNING in {sql}");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(42, 42)]
    #[case(u64::MAX, i64::MAX)]
    fn sql_bounds_saturate(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bound(value), expected);
    }
}
