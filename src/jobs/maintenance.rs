//! Periodic maintenance sweep.
//!
//! Runs outside the request path, from the job worker:
//! - expires active course requests untouched for too long
//! - queues moderation-reminder emails for tutors whose profile has been
//!   pending longer than their country's reminder offset

use chrono::{Duration, Utc};

use crate::config::{DEFAULT_REMINDER_DAYS, REQUEST_EXPIRY_DAYS};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

use super::EmailJob;

/// Outcome of one sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    pub expired_requests: u64,
    pub reminder_emails: Vec<EmailJob>,
}

/// Run one maintenance pass and collect the emails to enqueue.
pub async fn run_sweep<U: UnitOfWork>(uow: &U) -> AppResult<SweepReport> {
    let now = Utc::now();
    let mut report = SweepReport::default();

    // Requests that sat active for months are no longer real leads
    let expiry_cutoff = now - Duration::days(REQUEST_EXPIRY_DAYS);
    report.expired_requests = uow.requests().expire_stale(expiry_cutoff).await?;
    if report.expired_requests > 0 {
        tracing::info!(count = report.expired_requests, "Expired stale course requests");
    }

    // Candidate set: anything pending for at least a day. Each profile is
    // then checked against its own country's offset.
    let broad_cutoff = now - Duration::days(1);
    let pending = uow.profiles().pending_since_before(broad_cutoff).await?;

    for profile in pending {
        let Some(user) = uow.users().find_by_id(profile.user_id).await? else {
            continue;
        };

        let reminder_days = match user.country_id {
            Some(country_id) => uow
                .countries()
                .find(country_id)
                .await?
                .map(|c| c.reminder_days)
                .unwrap_or(DEFAULT_REMINDER_DAYS),
            None => DEFAULT_REMINDER_DAYS,
        };

        let days_pending = (now - profile.updated_at).num_days();
        if days_pending >= i64::from(reminder_days) {
            report
                .reminder_emails
                .push(EmailJob::moderation_reminder(user.email, days_pending));
        }
    }

    Ok(report)
}
