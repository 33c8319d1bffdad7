use crate::error::OpError;
use crate::probe;
use bosun_core::StopTuning;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use std::time::Duration;
use tracing::{debug, warn};

/// Drive one pid through graceful-then-forceful shutdown.
///
/// SIGTERM, then poll liveness up to `max_polls` times; if the process is
/// still there, SIGKILL, pause, and re-probe. Success means "no longer
/// alive", whichever signal got us there; a pid that was already dead is
/// an immediate success. Only surviving SIGKILL is a failure, and that is
/// surfaced to the caller rather than retried.
pub async fn escalate(pid: u32, tuning: &StopTuning) -> Result<(), OpError> {
	let target = Pid::from_raw(pid as i32);

	if !probe::is_alive(pid) {
		reap(target);
		return Ok(());
	}

	let _ = kill(target, Signal::SIGTERM);
	for attempt in 0..tuning.max_polls {
		tokio::time::sleep(Duration::from_millis(tuning.poll_interval_ms)).await;
		if !probe::is_alive(pid) {
			debug!("pid {} exited after SIGTERM (poll {})", pid, attempt + 1);
			reap(target);
			return Ok(());
		}
	}

	warn!("pid {} ignored SIGTERM, sending SIGKILL", pid);
	let _ = kill(target, Signal::SIGKILL);
	tokio::time::sleep(Duration::from_millis(tuning.kill_pause_ms)).await;

	if probe::is_alive(pid) {
		return Err(OpError::TerminationFailure { pid });
	}
	reap(target);
	Ok(())
}

/// Collect the exit status if the pid was our own child so long-lived
/// callers do not accumulate zombies. ECHILD (not our child) is fine.
fn reap(pid: Pid) {
	let _ = waitpid(pid, Some(WaitPidFlag::WNOHANG));
}

/// Best-effort sweep for stray processes matching known service command
/// signatures. Runs after a full stop; a service may have forked children
/// that escaped the tracked pid. Individual failures are ignored and
/// nothing is reported to the caller.
pub async fn sweep_orphans(patterns: &[String]) {
	for pattern in patterns {
		debug!("orphan sweep: pkill -f {:?}", pattern);
		let _ = tokio::process::Command::new("pkill")
			.arg("-f")
			.arg(pattern)
			.status()
			.await;
	}
}
