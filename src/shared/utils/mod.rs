pub mod password_policy;
pub mod slug;

pub use password_policy::*;
pub use slug::*;
