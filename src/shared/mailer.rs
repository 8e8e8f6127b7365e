use anyhow::Result;
use async_trait::async_trait;

/// Outbound mail collaborator. Actual delivery lives outside this service;
/// the default implementation just records the message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Logs outgoing mail instead of delivering it. Used in development and
/// tests, and as the default until a real transport is wired in.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        tracing::info!(to, subject, body, "outgoing mail");
        Ok(())
    }
}
