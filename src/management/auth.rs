use chrono::Utc;

use crate::{Res, config::Config, spotify, types::Token};

// Refresh this many seconds before the token actually expires.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the credential of the current run.
///
/// The token lives in memory only and is dropped at exit; an expiring token
/// is refreshed through the accounts service instead of re-running the
/// browser consent step.
pub struct TokenManager {
    config: Config,
    token: Token,
}

impl TokenManager {
    pub fn new(config: Config, token: Token) -> Self {
        TokenManager { config, token }
    }

    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() && !self.token.refresh_token.is_empty() {
            self.token =
                spotify::auth::refresh_token(&self.config, &self.token.refresh_token).await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
