//! CSV encoding of the user directory.
//!
//! Columns are fixed as `Name,Email,Phone,Address,Role,Created At`; the
//! creation time is written as an ISO-8601 UTC timestamp with millisecond
//! precision (`2024-01-02T03:04:05.678Z`). Fields are quoted only when they
//! contain delimiters, quotes, or line breaks.

use chrono::SecondsFormat;
use csv::{Terminator, WriterBuilder};

use crate::domain::User;
use crate::domain::ports::{UserExportEncoder, UserExportError};

const HEADER: [&str; 6] = ["Name", "Email", "Phone", "Address", "Role", "Created At"];

/// Export encoder producing `users_export.csv`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvUserExportEncoder;

fn write_error(error: impl std::fmt::Display) -> UserExportError {
    UserExportError::write(error.to_string())
}

impl UserExportEncoder for CsvUserExportEncoder {
    fn file_name(&self) -> &'static str {
        "users_export.csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn encode(&self, users: &[User]) -> Result<Vec<u8>, UserExportError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(HEADER).map_err(write_error)?;
        for user in users {
            let created_at = user.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
            writer
                .write_record([
                    user.name.as_str(),
                    user.email.as_str(),
                    user.phone.as_str(),
                    user.address.as_str(),
                    user.role.as_str(),
                    created_at.as_str(),
                ])
                .map_err(write_error)?;
        }
        writer.into_inner().map_err(write_error)
    }
}
