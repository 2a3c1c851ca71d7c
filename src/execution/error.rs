use thiserror::Error;

/// Failure of a call to the execution service. Every variant renders as a
/// message fit to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
	#[error("could not reach the execution service: {0}")]
	Transport(String),
	#[error("execution service responded with status {status}")]
	Status { status: u16 },
	#[error("unexpected response from the execution service: {0}")]
	MalformedResponse(String),
	#[error("strategy run failed: {0}")]
	Rejected(String),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
