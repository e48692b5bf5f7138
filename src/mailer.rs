use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::RelayConfig;
use crate::error::SubmitError;
use crate::models::message::OutboundMessage;

/// Outbound mail capability. Production speaks SMTP through lettre; tests
/// substitute a recording fake.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Connectivity and authentication probe, run before any message is
    /// composed.
    async fn verify(&self) -> Result<()>;

    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// Produces a fresh `RelayConfig` for the current request.
pub type ConfigSource = Arc<dyn Fn() -> Result<RelayConfig, SubmitError> + Send + Sync>;

/// Builds a relay for the current request's config.
pub type RelayFactory = Arc<dyn Fn(&RelayConfig) -> Result<Arc<dyn MailRelay>> + Send + Sync>;

pub fn env_config_source() -> ConfigSource {
    Arc::new(RelayConfig::from_env)
}

pub fn smtp_relay_factory() -> RelayFactory {
    fn connect(config: &RelayConfig) -> Result<Arc<dyn MailRelay>> {
        let relay = SmtpRelay::connect(config)?;
        Ok(Arc::new(relay))
    }
    Arc::new(connect)
}

pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn connect(config: &RelayConfig) -> Result<Self> {
        let mut builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        builder = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        // Certificate checks stay on unless the operator opted out, see
        // SMTP_ACCEPT_INVALID_CERTS.
        if config.accept_invalid_certs {
            let tls = TlsParameters::builder(config.host.clone())
                .dangerous_accept_invalid_certs(true)
                .build()?;
            builder = builder.tls(if config.secure {
                Tls::Wrapper(tls)
            } else {
                Tls::Required(tls)
            });
        }

        Ok(SmtpRelay {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn verify(&self) -> Result<()> {
        tracing::info!("probing mail relay connection");
        if !self.transport.test_connection().await? {
            bail!("mail relay refused the connection probe");
        }
        Ok(())
    }

    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let from = Mailbox::new(
            Some(message.from_name.clone()),
            message
                .from_address
                .parse()
                .context("invalid sender address")?,
        );
        let to: Mailbox = message.to.parse().context("invalid recipient address")?;

        let mail = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())?;

        self.transport.send(mail).await?;
        tracing::info!("delivered \"{}\" to {}", message.subject, message.to);
        Ok(())
    }
}
