//! Client routes and navigation bar.

use std::fmt;

/// Title shown in the navigation bar.
pub const NAV_TITLE: &str = "User Management";

/// Label of the navigation link to the list.
pub const NAV_LIST_LINK: &str = "Users List";

/// A screen of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Paginated, searchable list (`/` or `/users`).
    List,
    /// Create form (`/users/add`).
    Add,
    /// Edit form for a user (`/users/:id/edit`).
    Edit(String),
    /// Read-only detail page (`/users/:id/view`).
    View(String),
}

impl Route {
    /// Match a path against the route table.
    ///
    /// # Examples
    ///
    /// ```
    /// use directory_client::routes::Route;
    ///
    /// assert_eq!(Route::parse("/"), Some(Route::List));
    /// assert_eq!(Route::parse("/users/42/edit"), Some(Route::Edit("42".to_owned())));
    /// assert_eq!(Route::parse("/settings"), None);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] | ["users"] => Some(Self::List),
            ["users", "add"] => Some(Self::Add),
            ["users", id, "edit"] if !id.is_empty() => Some(Self::Edit((*id).to_owned())),
            ["users", id, "view"] if !id.is_empty() => Some(Self::View((*id).to_owned())),
            _ => None,
        }
    }

    /// Whether the navigation link to the list is highlighted here.
    #[must_use]
    pub const fn nav_link_active(&self) -> bool {
        matches!(self, Self::List)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("/users"),
            Self::Add => f.write_str("/users/add"),
            Self::Edit(id) => write!(f, "/users/{id}/edit"),
            Self::View(id) => write!(f, "/users/{id}/view"),
        }
    }
}

/// Render the navigation bar for `current`.
#[must_use]
pub fn navbar(current: &Route) -> String {
    let marker = if current.nav_link_active() { "*" } else { " " };
    format!("{NAV_TITLE}  [{marker}] {NAV_LIST_LINK}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/", Some(Route::List))]
    #[case("/users", Some(Route::List))]
    #[case("/users/", Some(Route::List))]
    #[case("/users/add", Some(Route::Add))]
    #[case("/users/abc/edit", Some(Route::Edit("abc".to_owned())))]
    #[case("/users/abc/view", Some(Route::View("abc".to_owned())))]
    #[case("/users//view", None)]
    #[case("/users/abc", None)]
    #[case("/elsewhere", None)]
    fn paths_resolve_to_routes(#[case] path: &str, #[case] expected: Option<Route>) {
        assert_eq!(Route::parse(path), expected);
    }

    #[rstest]
    #[case(Route::Add)]
    #[case(Route::Edit("abc".to_owned()))]
    #[case(Route::View("abc".to_owned()))]
    fn display_round_trips_through_parse(#[case] route: Route) {
        assert_eq!(Route::parse(&route.to_string()), Some(route));
    }

    #[rstest]
    fn list_link_is_active_only_on_the_list() {
        assert!(navbar(&Route::List).contains("[*] Users List"));
        assert!(navbar(&Route::Add).contains("[ ] Users List"));
        assert!(navbar(&Route::Add).starts_with("User Management"));
    }
}
