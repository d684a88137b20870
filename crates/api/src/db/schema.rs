//! Statically declared shape of the observation store.
//!
//! The service never creates or alters tables in a real database; these
//! declarations are checked against the live file at startup and used to
//! build in-memory stores.

pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub ddl: &'static str,
}

pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["id", "station", "date", "prcp", "tobs"],
    ddl: "CREATE TABLE measurement (
        id INTEGER NOT NULL,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT,
        PRIMARY KEY (id)
    )",
};

pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
    ddl: "CREATE TABLE station (
        id INTEGER NOT NULL,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT,
        PRIMARY KEY (id)
    )",
};

pub const TABLES: [&TableSchema; 2] = [&MEASUREMENT, &STATION];
