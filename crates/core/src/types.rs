/// Store identifiers are the directory's slugs (e.g. `"maison-verre"`).
pub type StoreId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
