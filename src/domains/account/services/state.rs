use std::sync::Arc;

use crate::domains::account::services::{AccountService, ResetTokenGenerator, TokenService};
use crate::shared::config::Config;
use crate::shared::database::Database;
use crate::shared::mailer::{LogMailer, Mailer};

/// Everything the account handlers need, wired once at startup.
#[derive(Clone)]
pub struct AccountState {
    pub account_service: AccountService,
    pub token_service: TokenService,
}

impl AccountState {
    pub fn new(db: Database, config: &Config) -> Self {
        let token_service = TokenService::new(
            &config.jwt_secret,
            config.access_token_minutes,
            config.refresh_token_days,
        );
        let reset_tokens = ResetTokenGenerator::new(&config.jwt_secret, config.reset_token_hours);
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        let account_service = AccountService::new(
            db,
            token_service.clone(),
            reset_tokens,
            mailer,
            config.reset_url_base.clone(),
        );

        Self {
            account_service,
            token_service,
        }
    }
}
