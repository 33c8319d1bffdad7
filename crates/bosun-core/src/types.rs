use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Static description of one supervised service. Immutable for the
/// supervisor's lifetime; declaration order in the config is start order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDef {
	pub name: String,
	/// Shell command line, run via `sh -c`.
	pub command: String,
	pub dir: PathBuf,
	/// Merged over the inherited environment, never replacing it.
	#[serde(default)]
	pub env: HashMap<String, String>,
	/// TCP port the service binds, checked for squatters before launch.
	#[serde(default)]
	pub port: Option<u16>,
	/// How long to wait after spawn before concluding the child survived.
	#[serde(default = "default_grace_ms")]
	pub startup_grace_ms: u64,
	/// Paths that must exist before launch (venv, node_modules, build output).
	#[serde(default)]
	pub requires: Vec<PathBuf>,
	/// Command-line pattern for the orphan sweep (`pkill -f`). Services
	/// without a pattern are skipped by the sweep.
	#[serde(default)]
	pub pattern: Option<String>,
}

fn default_grace_ms() -> u64 {
	2000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
	Running,
	Stopped,
	/// Pid store could not be read; not the same as confirmed down.
	Unknown,
}

/// Point-in-time view of one service, as reported to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceState {
	pub name: String,
	pub status: ServiceStatus,
	pub pid: Option<u32>,
	pub port: Option<u16>,
	pub log_file: PathBuf,
}

impl ServiceState {
	pub fn is_running(&self) -> bool {
		self.status == ServiceStatus::Running
	}
}

/// Outcome of one operation on one service. Failures are encoded, never
/// raised, so batch reports always have one row per service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
	pub name: String,
	pub success: bool,
	pub message: String,
}

impl OpResult {
	pub fn ok(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			success: true,
			message: message.into(),
		}
	}

	pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			success: false,
			message: message.into(),
		}
	}
}
