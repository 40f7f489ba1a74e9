//! Error types for the upload pipeline.
//!
//! Each stage gets its own enum so callers can tell a bad config apart
//! from a locked spreadsheet or a dead network. Conversion into
//! [`anyhow::Error`] at the CLI boundary is automatic via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read at all.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or misses a required field.
    #[error("config file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No API token in the file and none in the environment.
    #[error("no API token: set `api_token` in the config or the KOBO_API_TOKEN environment variable")]
    MissingToken,
}

/// Errors while reading tabular input files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Missing file, or a file still open in another program. Excel keeps
    /// an exclusive lock on open workbooks, so this is a routine hazard.
    #[error("failed to open {path} (missing, or still open in another program?): {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// The workbook contains no sheets.
    #[error("{path} has no sheets")]
    NoSheets { path: PathBuf },

    /// A sheet exists but could not be read.
    #[error("failed to read sheet '{sheet}' in {path}: {source}")]
    Sheet {
        sheet: String,
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// The first sheet has no header row.
    #[error("sheet '{sheet}' in {path} is empty")]
    EmptySheet { sheet: String, path: PathBuf },

    /// A configured id column is absent from a table's header.
    #[error("column '{column}' not found in {table} (available: {available})")]
    MissingColumn {
        column: String,
        table: String,
        available: String,
    },
}

/// Errors while serializing a joined record to XML.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write submission XML: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to build submission XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("submission XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors while posting a submission.
///
/// A non-2xx response is not an error here; the server answered and the
/// reporter logs whatever it said. Only transport-level failures land in
/// this enum.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
