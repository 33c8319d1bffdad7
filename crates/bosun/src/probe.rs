/// Cheap existence check against a pid. Not a health check.
///
/// On Linux, `/proc` is consulted so zombies count as dead: a child that
/// exited but has not been reaped yet would still answer a signal-0 probe,
/// and treating it as running would wedge the termination sequence.
/// Elsewhere, a zero-effect `kill` is used; EPERM means the process exists
/// but belongs to another user, which is still "alive". Calling it dead
/// would make the launcher spawn a duplicate onto the same port.
pub fn is_alive(pid: u32) -> bool {
	#[cfg(target_os = "linux")]
	{
		if !std::path::Path::new(&format!("/proc/{}", pid)).exists() {
			return false;
		}
		match proc_stat_state(pid) {
			Some('Z') | Some('X') => false,
			_ => true,
		}
	}

	#[cfg(not(target_os = "linux"))]
	{
		signal_probe(pid)
	}
}

/// Zero-effect signal probe. EPERM still means the process exists.
#[cfg(not(target_os = "linux"))]
fn signal_probe(pid: u32) -> bool {
	use nix::errno::Errno;
	use nix::sys::signal::kill;
	use nix::unistd::Pid;

	match kill(Pid::from_raw(pid as i32), None) {
		Ok(()) => true,
		Err(Errno::EPERM) => true,
		Err(_) => false,
	}
}

/// State field from `/proc/<pid>/stat`. The comm field may contain spaces,
/// so scan past the closing paren before taking the next token.
#[cfg(target_os = "linux")]
fn proc_stat_state(pid: u32) -> Option<char> {
	let contents = std::fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
	let rest = &contents[contents.rfind(')')? + 1..];
	rest.split_whitespace().next()?.chars().next()
}

/// Which pid, if any, holds `port` on a listening TCP socket.
///
/// Best-effort pre-launch safety check: if the socket table cannot be read
/// at all, the answer is `None` and startup proceeds without the check.
pub fn owner_of_port(port: u16) -> Option<u32> {
	use netstat2::{
		get_sockets_info, AddressFamilyFlags, ProtocolFlags, ProtocolSocketInfo, TcpState,
	};

	let af = AddressFamilyFlags::IPV4 | AddressFamilyFlags::IPV6;
	let sockets = get_sockets_info(af, ProtocolFlags::TCP).ok()?;

	for si in &sockets {
		if let ProtocolSocketInfo::Tcp(ref tcp) = si.protocol_socket_info {
			if tcp.state == TcpState::Listen && tcp.local_port == port {
				if let Some(pid) = si.associated_pids.first() {
					return Some(*pid);
				}
			}
		}
	}
	None
}
