//! Jobs command - Background job management.
//!
//! - `work`: run the worker (email queue + periodic maintenance sweep)
//! - `list`: show job queue status
//! - `clear`: remove failed jobs from the queue

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::{Config, MAINTENANCE_SWEEP_INTERVAL_SECONDS};
use crate::errors::{AppError, AppResult};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Start the background job worker.
///
/// Processes queued emails and runs the maintenance sweep (course-request
/// expiry, moderation reminders) on a fixed interval.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;
    use apalis_sql::postgres::PostgresStorage;
    use apalis_sql::sqlx::postgres::PgPoolOptions;

    use crate::infra::{Database, Persistence};
    use crate::jobs::{email_job_handler, run_sweep, EmailJob};

    tracing::info!("Connecting to database for job worker...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Create the apalis tables on first run
    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    let email_storage: PostgresStorage<EmailJob> = PostgresStorage::new(pool);

    // Maintenance sweep on its own connection, pushing reminder emails
    // into the queue the worker drains.
    let db = Database::connect_without_migrations(config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let persistence = Persistence::new(db.get_connection());
    let mut sweep_storage = email_storage.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            MAINTENANCE_SWEEP_INTERVAL_SECONDS,
        ));
        loop {
            interval.tick().await;
            match run_sweep(&persistence).await {
                Ok(report) => {
                    tracing::info!(
                        expired = report.expired_requests,
                        reminders = report.reminder_emails.len(),
                        "Maintenance sweep finished"
                    );
                    for job in report.reminder_emails {
                        if let Err(e) = sweep_storage.push(job).await {
                            tracing::error!("Failed to enqueue reminder email: {}", e);
                        }
                    }
                }
                Err(e) => tracing::error!("Maintenance sweep failed: {}", e),
            }
        }
    });

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new("email-worker")
        .backend(email_storage)
        .build_fn(email_job_handler);

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

/// List pending and failed jobs
async fn list_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database, Statement};

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    if !schema_exists {
        println!("\n=== Job Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' first to create the queue tables.");
        println!("========================\n");
        return Ok(());
    }

    let rows = db
        .query_all(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs GROUP BY status".to_string(),
        ))
        .await
        .unwrap_or_default();

    let mut pending = 0i64;
    let mut running = 0i64;
    let mut failed = 0i64;
    let mut done = 0i64;

    for row in rows {
        if let (Ok(status), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            match status.as_str() {
                "Pending" => pending = count,
                "Running" => running = count,
                "Failed" => failed = count,
                "Done" => done = count,
                _ => {}
            }
        }
    }

    println!("\n=== Job Queue Status ===");
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    println!("========================\n");

    Ok(())
}

/// Clear failed jobs from the queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database, Statement};

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    if !schema_exists {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    let result = db
        .execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed'".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Failed to clear jobs: {}", e)))?;

    println!("Cleared {} failed job(s) from the queue.", result.rows_affected());

    Ok(())
}
