//! Presentational widgets: the search bar and the users table.

use crate::model::User;
use crate::routes::Route;

/// Placeholder shown in an empty search bar.
pub const SEARCH_PLACEHOLDER: &str = "Search users by name, email, phone, address, or role...";

/// Line rendered in place of rows for an empty page.
pub const EMPTY_TABLE_MESSAGE: &str = "No users found";

const HEADERS: [&str; 6] = ["Name", "Email", "Phone", "Address", "Role", "Id"];

/// Render the search bar with its current value.
#[must_use]
pub fn search_bar(value: &str) -> String {
    if value.is_empty() {
        format!("Search: {SEARCH_PLACEHOLDER}")
    } else {
        format!("Search: {value}")
    }
}

/// Per-row actions offered by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Open the detail page.
    View,
    /// Open the edit form.
    Edit,
    /// Delete after confirmation.
    Delete,
}

impl RowAction {
    /// Route the action navigates to; deletion stays on the list.
    #[must_use]
    pub fn route(self, user_id: &str) -> Option<Route> {
        match self {
            Self::View => Some(Route::View(user_id.to_owned())),
            Self::Edit => Some(Route::Edit(user_id.to_owned())),
            Self::Delete => None,
        }
    }
}

fn cells(user: &User) -> [&str; 6] {
    [
        user.name.as_str(),
        user.email.as_str(),
        user.phone.as_str(),
        user.address.as_str(),
        user.role.as_str(),
        user.id.as_str(),
    ]
}

/// Render `users` as an aligned text table.
///
/// # Examples
///
/// ```
/// use directory_client::views::table::render_table;
///
/// assert!(render_table(&[]).ends_with("No users found\n"));
/// ```
#[must_use]
pub fn render_table(users: &[User]) -> String {
    let mut widths = HEADERS.map(|header| header.chars().count());
    for user in users {
        for (width, cell) in widths.iter_mut().zip(cells(user)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS, widths);
    if users.is_empty() {
        out.push_str(EMPTY_TABLE_MESSAGE);
        out.push('\n');
    }
    for user in users {
        push_row(&mut out, cells(user), widths);
    }
    out
}

fn push_row(out: &mut String, row: [&str; 6], widths: [usize; 6]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn user(name: &str, id: &str) -> User {
        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        User {
            id: id.to_owned(),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "123".to_owned(),
            address: "Addr".to_owned(),
            role: "Admin".to_owned(),
            created_at,
            updated_at: created_at,
        }
    }

    #[rstest]
    fn empty_pages_render_the_placeholder_row() {
        let rendered = render_table(&[]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, ["Name | Email | Phone | Address | Role | Id", "No users found"]);
    }

    #[rstest]
    fn columns_are_padded_to_the_widest_cell() {
        let rendered = render_table(&[user("Ada", "1"), user("Grace", "2")]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().skip(1).any(|line| line.starts_with("Ada   | ada@example.com  ")));
        assert!(!rendered.contains(EMPTY_TABLE_MESSAGE));
    }

    #[rstest]
    #[case(RowAction::View, Some(Route::View("7".to_owned())))]
    #[case(RowAction::Edit, Some(Route::Edit("7".to_owned())))]
    #[case(RowAction::Delete, None)]
    fn row_actions_map_to_routes(#[case] action: RowAction, #[case] expected: Option<Route>) {
        assert_eq!(action.route("7"), expected);
    }

    #[rstest]
    fn search_bar_shows_placeholder_until_typed_into() {
        assert!(search_bar("").contains(SEARCH_PLACEHOLDER));
        assert_eq!(search_bar("ada"), "Search: ada");
    }
}
