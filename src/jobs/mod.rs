//! Background jobs processed by the apalis worker.

mod email_job;
pub mod maintenance;

pub use email_job::{email_job_handler, EmailJob};
pub use maintenance::{run_sweep, SweepReport};
