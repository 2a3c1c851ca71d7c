//! Boundary to the external backtesting service: request building, the HTTP
//! client, response parsing and the one-at-a-time submission tracker.

mod client;
mod error;
mod report;
mod request;
mod submission;

pub use client::{ExecutionClient, HttpExecutionClient};
pub use error::ExecutionError;
pub use report::{ExecutionReport, format_cell};
pub use request::{ExecutionParams, build_request};
pub use submission::{Submission, SubmissionState, submit};
