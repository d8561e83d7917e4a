//! Email notification job.
//!
//! Moderation decisions and reminders are delivered by the background
//! worker. Without SMTP configuration the emails are logged, which is what
//! development and CI run with.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Reminder for a tutor whose profile is still in the moderation queue.
    pub fn moderation_reminder(to: impl Into<String>, days_pending: i64) -> Self {
        Self::new(
            to,
            "Votre profil est en cours de validation",
            format!(
                "Votre profil enseignant est en attente de validation depuis {} jours. \
                 Notre équipe le traite au plus vite.",
                days_pending
            ),
        )
    }
}

/// SMTP configuration from environment.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();

    tracing::info!(
        to = %job.to,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::info!(
            "=== EMAIL (not sent) ===\nFrom: {}\nTo: {}\nSubject: {}\nBody:\n{}\n========================",
            config.smtp_from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // TODO: wire lettre once an SMTP relay is provisioned for production
    tracing::warn!("SMTP configured but no transport is wired; email not sent");

    Ok(())
}
