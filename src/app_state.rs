//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, expense::GroupId, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The group shown when the root page is requested.
    pub default_group_id: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an error if:
    /// - the database cannot be initialized,
    /// - `local_timezone` is not a known timezone,
    /// - or `default_group_id` is blank.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        default_group_id: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let default_group_id = GroupId::new(default_group_id)?;

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            default_group_id: default_group_id.as_str().to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
