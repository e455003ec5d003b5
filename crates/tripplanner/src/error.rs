//! Error types for tripplanner.
//!
//! This module defines all error types used throughout the tripplanner crate.
//! Storage failures are normally absorbed by [`crate::storage::LocalStore`];
//! user input failures are surfaced through the page's alert primitive.

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::CardKind;

/// The main error type for tripplanner operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A write would exceed the store's quota.
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    StorageFull {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === User Input Errors ===
    /// A date field is blank or not a `YYYY-MM-DD` date.
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate {
        /// Which field was invalid.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// The trip ends before it starts.
    #[error("End date must be after start date!")]
    InvalidDateRange {
        /// Entered start date.
        start: String,
        /// Entered end date.
        end: String,
    },

    /// The trip is longer than an itinerary can hold.
    #[error("Trips can be at most {max} days long!")]
    TripTooLong {
        /// Computed trip length.
        days: i64,
        /// Longest supported trip.
        max: u32,
    },

    // === Model Errors ===
    /// No card at the given position or with the given id.
    #[error("no {kind} card {reference}")]
    CardNotFound {
        /// Collection that was searched.
        kind: CardKind,
        /// Human readable description of the lookup.
        reference: String,
    },

    /// A card kind has no field with this name.
    #[error("{kind} cards have no field named '{field}'")]
    UnknownField {
        /// Card kind.
        kind: CardKind,
        /// Requested field name.
        field: String,
    },

    /// A select field was given a value outside its options.
    #[error("'{value}' is not a valid {field} for {kind} cards")]
    InvalidOption {
        /// Card kind.
        kind: CardKind,
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// No budget row has this label.
    #[error("no budget item labelled '{label}'")]
    UnknownBudgetItem {
        /// Requested label.
        label: String,
    },

    /// The itinerary has no such day.
    #[error("itinerary has no day {day}")]
    DayNotFound {
        /// Requested 1-based day number.
        day: u32,
    },

    /// A day has no activity at this index.
    #[error("day {day} has no activity {index}")]
    ActivityNotFound {
        /// 1-based day number.
        day: u32,
        /// 0-based activity index.
        index: usize,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for tripplanner operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a card lookup error for a 1-based position.
    #[must_use]
    pub fn card_at(kind: CardKind, position: usize) -> Self {
        Self::CardNotFound {
            kind,
            reference: format!("at position {position}"),
        }
    }

    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(kind: CardKind, field: impl Into<String>) -> Self {
        Self::UnknownField {
            kind,
            field: field.into(),
        }
    }

    /// Check if this error comes from the persistence layer.
    ///
    /// These are the errors the local store swallows.
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::StorageFull { .. }
                | Self::Json(_)
        )
    }

    /// Check if this error is a user input validation failure.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::InvalidDateRange { .. } | Self::TripTooLong { .. }
        )
    }
}
