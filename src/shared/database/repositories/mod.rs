pub mod account;
pub mod documents;

pub use account::*;
pub use documents::*;
