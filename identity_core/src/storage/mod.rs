mod config;
mod data_store;
mod schema_validation;

pub(crate) use config::{DB_TABLE_API_KEYS, DB_TABLE_SOCIAL_ACCOUNTS, DB_TABLE_USERS};
pub(crate) use data_store::CREDENTIAL_STORE;
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
