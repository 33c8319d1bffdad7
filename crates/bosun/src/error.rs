use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds for supervisor operations. Converted at the public
/// boundary into `OpResult` rows; nothing escapes a batch as a panic.
#[derive(Debug, Error)]
pub enum OpError {
	/// A required runtime prerequisite is absent; launch refused.
	#[error("missing prerequisite: {}", .0.display())]
	PreconditionMissing(PathBuf),
	/// A port squatter was found and would not die.
	#[error("port {port} is held by pid {pid} and it survived SIGKILL")]
	PortConflict { port: u16, pid: u32 },
	/// The child died within the startup grace window.
	#[error("died during startup, see {}", .log.display())]
	LaunchFailure { log: PathBuf },
	/// The process survived the forceful signal. Fatal, not retried.
	#[error("pid {pid} survived SIGKILL")]
	TerminationFailure { pid: u32 },
	#[error("{0}")]
	Io(#[from] std::io::Error),
}
