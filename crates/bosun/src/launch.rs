use crate::error::OpError;
use crate::logs;
use crate::pidfile::PidStore;
use crate::probe;
use crate::terminate;
use bosun_core::{Config, ServiceDef};
use std::process::Stdio;
use std::time::Duration;
use tracing::{info, warn};

/// Spawn one service and confirm it survived its grace window.
///
/// The child runs in its own process group with stdout/stderr merged and
/// appended to the service log, so it outlives the supervisor. The pid is
/// persisted only after the survival check; a child that dies inside the
/// grace window never reaches the pid store.
pub async fn launch(config: &Config, pids: &PidStore, def: &ServiceDef) -> Result<String, OpError> {
	// Idempotent: a live recorded pid means there is nothing to do. An
	// unreadable store is surfaced instead of risking a double spawn of a
	// service that may well be running.
	if let Some(pid) = pids.read(&def.name)? {
		if probe::is_alive(pid) {
			return Ok(format!("already running (pid {})", pid));
		}
	}

	for path in &def.requires {
		if !path.exists() {
			return Err(OpError::PreconditionMissing(path.clone()));
		}
	}

	// A previous crashed run can leave the port bound by a process we no
	// longer track. Evict it; only a kill that fails blocks the launch.
	if let Some(port) = def.port {
		if let Some(squatter) = probe::owner_of_port(port) {
			warn!(
				"port {} held by pid {}, evicting before launching {}",
				port, squatter, def.name
			);
			terminate::escalate(squatter, &config.stop)
				.await
				.map_err(|_| OpError::PortConflict { port, pid: squatter })?;
		}
	}

	let log_path = config.log_path(&def.name);
	logs::append_separator(&log_path)?;
	let log_file = std::fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(&log_path)?;
	let stderr_file = log_file.try_clone()?;

	let mut cmd = tokio::process::Command::new("sh");
	cmd.arg("-c")
		.arg(&def.command)
		.current_dir(&def.dir)
		.stdin(Stdio::null())
		.stdout(Stdio::from(log_file))
		.stderr(Stdio::from(stderr_file))
		// Own process group, so the child survives supervisor exit.
		.process_group(0);
	for (key, val) in &def.env {
		cmd.env(key, val);
	}

	let mut child = cmd.spawn()?;
	let pid = child.id().unwrap_or(0);
	info!("spawned {} (pid {})", def.name, pid);

	// Let obvious startup failures surface before declaring success.
	tokio::time::sleep(Duration::from_millis(def.startup_grace_ms)).await;

	let died = match child.try_wait() {
		Ok(Some(_)) => true,
		Ok(None) => false,
		Err(_) => !probe::is_alive(pid),
	};
	if died {
		return Err(OpError::LaunchFailure { log: log_path });
	}

	pids.write(&def.name, pid)?;
	// Dropping the handle detaches the child from this supervisor.
	drop(child);

	Ok(match def.port {
		Some(port) => format!("started (pid {}, port {})", pid, port),
		None => format!("started (pid {})", pid),
	})
}
