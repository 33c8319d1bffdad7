use crate::error::ConfigError;
use crate::types::ServiceDef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Immutable supervisor configuration, constructed once and passed by
/// reference to every component. `services` order is the start order;
/// stops run in the reverse order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	/// Root for supervisor state: pid files under `pids/`, logs under `logs/`.
	pub state_dir: PathBuf,
	pub services: Vec<ServiceDef>,
	#[serde(default)]
	pub stop: StopTuning,
	/// Pause between the stop and start phases of a restart.
	#[serde(default = "default_restart_pause_ms")]
	pub restart_pause_ms: u64,
}

/// Bounds for the graceful-then-forceful termination sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTuning {
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	#[serde(default = "default_max_polls")]
	pub max_polls: u32,
	/// Wait after SIGKILL before the final liveness re-probe.
	#[serde(default = "default_kill_pause_ms")]
	pub kill_pause_ms: u64,
}

impl Default for StopTuning {
	fn default() -> Self {
		Self {
			poll_interval_ms: default_poll_interval_ms(),
			max_polls: default_max_polls(),
			kill_pause_ms: default_kill_pause_ms(),
		}
	}
}

fn default_poll_interval_ms() -> u64 {
	500
}
fn default_max_polls() -> u32 {
	10
}
fn default_kill_pause_ms() -> u64 {
	1000
}
fn default_restart_pause_ms() -> u64 {
	1000
}

impl Config {
	pub fn new(state_dir: impl Into<PathBuf>, services: Vec<ServiceDef>) -> Self {
		Self {
			state_dir: state_dir.into(),
			services,
			stop: StopTuning::default(),
			restart_pause_ms: default_restart_pause_ms(),
		}
	}

	pub fn load(path: &Path) -> Result<Config, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		let config = toml::from_str(&content)?;
		Ok(config)
	}

	pub fn service(&self, name: &str) -> Option<&ServiceDef> {
		self.services.iter().find(|s| s.name == name)
	}

	pub fn pid_dir(&self) -> PathBuf {
		self.state_dir.join("pids")
	}

	pub fn log_dir(&self) -> PathBuf {
		self.state_dir.join("logs")
	}

	pub fn pid_path(&self, service: &str) -> PathBuf {
		self.pid_dir().join(format!("{}.pid", service))
	}

	pub fn log_path(&self, service: &str) -> PathBuf {
		self.log_dir().join(format!("{}.log", service))
	}
}
