use crate::launch;
use crate::logs;
use crate::pidfile::PidStore;
use crate::probe;
use crate::terminate;
use bosun_core::{Config, OpResult, ServiceState, ServiceStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

/// The closed set of supervisor operations. Adding one is a compile-time
/// change: `run` matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
	Start,
	Stop,
	Restart,
	Status,
	Logs { lines: usize },
}

/// What an operation reports back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
	Batch { results: Vec<OpResult> },
	Status { services: Vec<ServiceState> },
	Logs { tails: BTreeMap<String, String> },
}

/// Supervisor for a fixed fleet of services on one host.
///
/// Holds the immutable [`Config`] and the pid store; every operation runs
/// to its bounded conclusion and reports per-service results instead of
/// failing the batch. Two supervisor invocations against the same state
/// directory at once is undefined behavior; operations are best-effort
/// idempotent, not lock-protected.
pub struct Supervisor {
	config: Config,
	pids: PidStore,
}

impl Supervisor {
	pub fn new(config: Config) -> Self {
		let pids = PidStore::new(config.pid_dir());
		Self { config, pids }
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub async fn run(&self, op: Op) -> Report {
		match op {
			Op::Start => Report::Batch {
				results: self.start_all().await,
			},
			Op::Stop => Report::Batch {
				results: self.stop_all().await,
			},
			Op::Restart => Report::Batch {
				results: self.restart_all().await,
			},
			Op::Status => Report::Status {
				services: self.status_all(),
			},
			Op::Logs { lines } => Report::Logs {
				tails: self.logs_all(lines),
			},
		}
	}

	pub async fn start(&self, name: &str) -> OpResult {
		let Some(def) = self.config.service(name) else {
			return OpResult::fail(name, format!("unknown service: {}", name));
		};
		match launch::launch(&self.config, &self.pids, def).await {
			Ok(msg) => OpResult::ok(name, msg),
			Err(e) => OpResult::fail(name, e.to_string()),
		}
	}

	/// Stop on an already-stopped service succeeds without sending a signal.
	pub async fn stop(&self, name: &str) -> OpResult {
		if self.config.service(name).is_none() {
			return OpResult::fail(name, format!("unknown service: {}", name));
		}
		let pid = match self.pids.read(name) {
			Ok(Some(pid)) => pid,
			Ok(None) => return OpResult::ok(name, "already stopped"),
			Err(e) => return OpResult::fail(name, format!("pid store unreadable: {}", e)),
		};
		if !probe::is_alive(pid) {
			let _ = self.pids.clear(name);
			return OpResult::ok(name, "already stopped");
		}
		match terminate::escalate(pid, &self.config.stop).await {
			Ok(()) => {
				let _ = self.pids.clear(name);
				info!("stopped {} (pid {})", name, pid);
				OpResult::ok(name, format!("stopped (pid {})", pid))
			}
			Err(e) => OpResult::fail(name, e.to_string()),
		}
	}

	pub async fn restart(&self, name: &str) -> OpResult {
		let stop = self.stop(name).await;
		if !stop.success {
			return OpResult::fail(name, format!("stop: {}", stop.message));
		}
		tokio::time::sleep(Duration::from_millis(self.config.restart_pause_ms)).await;
		self.start(name).await
	}

	/// Point-in-time view. A pid file pointing at a dead process is stale
	/// state: it is removed here and the service reported stopped. `None`
	/// only for names not in the config.
	pub fn status(&self, name: &str) -> Option<ServiceState> {
		let def = self.config.service(name)?;
		let log_file = self.config.log_path(name);

		let (status, pid) = match self.pids.read(name) {
			Ok(Some(pid)) if probe::is_alive(pid) => (ServiceStatus::Running, Some(pid)),
			Ok(Some(_)) => {
				// self-healing read
				let _ = self.pids.clear(name);
				(ServiceStatus::Stopped, None)
			}
			Ok(None) => (ServiceStatus::Stopped, None),
			Err(_) => (ServiceStatus::Unknown, None),
		};

		Some(ServiceState {
			name: name.to_string(),
			status,
			pid,
			port: if status == ServiceStatus::Running {
				def.port
			} else {
				None
			},
			log_file,
		})
	}

	pub fn status_all(&self) -> Vec<ServiceState> {
		self.config
			.services
			.iter()
			.filter_map(|def| self.status(&def.name))
			.collect()
	}

	/// Tail of one service log. `None` for names not in the config; a
	/// service that never started yields an empty tail.
	pub fn logs(&self, name: &str, lines: usize) -> Option<String> {
		self.config.service(name)?;
		Some(logs::tail(&self.config.log_path(name), lines).unwrap_or_default())
	}

	pub fn logs_all(&self, lines: usize) -> BTreeMap<String, String> {
		self.config
			.services
			.iter()
			.filter_map(|def| Some((def.name.clone(), self.logs(&def.name, lines)?)))
			.collect()
	}

	/// Start every service in declared dependency order. One failure does
	/// not abort the rest; the result has one row per service.
	pub async fn start_all(&self) -> Vec<OpResult> {
		let mut results = Vec::with_capacity(self.config.services.len());
		for def in &self.config.services {
			results.push(self.start(&def.name).await);
		}
		results
	}

	/// Stop every service in reverse declared order, then sweep once for
	/// orphans matching the declared command patterns.
	pub async fn stop_all(&self) -> Vec<OpResult> {
		let mut results = Vec::with_capacity(self.config.services.len());
		for def in self.config.services.iter().rev() {
			results.push(self.stop(&def.name).await);
		}

		let patterns: Vec<String> = self
			.config
			.services
			.iter()
			.filter_map(|def| def.pattern.clone())
			.collect();
		terminate::sweep_orphans(&patterns).await;

		results
	}

	/// Full stop, a bounded pause, then a full start. Results from the two
	/// phases are folded into one row per service, in declared order.
	pub async fn restart_all(&self) -> Vec<OpResult> {
		let stops = self.stop_all().await;
		tokio::time::sleep(Duration::from_millis(self.config.restart_pause_ms)).await;
		let starts = self.start_all().await;

		self.config
			.services
			.iter()
			.map(|def| {
				let stop = stops.iter().find(|r| r.name == def.name);
				let start = starts
					.iter()
					.find(|r| r.name == def.name)
					.cloned()
					.unwrap_or_else(|| OpResult::fail(def.name.clone(), "not attempted"));

				match stop {
					Some(stop) if !stop.success => OpResult::fail(
						def.name.clone(),
						format!("stop: {}; start: {}", stop.message, start.message),
					),
					_ => start,
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn op_wire_format() {
		let json = serde_json::to_string(&Op::Logs { lines: 40 }).unwrap();
		assert_eq!(json, r#"{"op":"logs","lines":40}"#);
		let op: Op = serde_json::from_str(r#"{"op":"start"}"#).unwrap();
		assert_eq!(op, Op::Start);
	}
}
