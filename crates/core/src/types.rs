/// All primary keys are PostgreSQL UUIDs generated by `gen_random_uuid()`.
pub type DbId = uuid::Uuid;

/// Identity issued by the external auth provider (the session `sub` claim).
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
