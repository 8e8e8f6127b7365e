pub mod account;
pub mod documents;
