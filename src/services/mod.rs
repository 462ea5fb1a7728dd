pub mod prompt;
pub mod record_store;
pub mod translator;
