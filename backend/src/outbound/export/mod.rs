//! File export encoders.

mod csv_user_export_encoder;

pub use csv_user_export_encoder::CsvUserExportEncoder;
