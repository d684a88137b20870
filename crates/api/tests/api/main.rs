mod helpers;
mod sqlite_store;
