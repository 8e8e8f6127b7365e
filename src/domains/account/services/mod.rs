pub mod account_service;
pub mod reset_service;
pub mod state;
pub mod token_service;

pub use account_service::AccountService;
pub use reset_service::ResetTokenGenerator;
pub use state::AccountState;
pub use token_service::TokenService;
