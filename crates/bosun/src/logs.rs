use std::io::{self, Write};
use std::path::Path;

/// Append the restart separator so operators can segment runs within one
/// log file. Creates the log directory and file on demand.
pub fn append_separator(log_path: &Path) -> io::Result<()> {
	if let Some(parent) = log_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	let mut file = std::fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(log_path)?;
	writeln!(
		file,
		"\n========== Service started {} ==========",
		now_timestamp()
	)
}

/// Last `max_lines` lines of a log file. A missing file is an empty tail,
/// not an error: the service simply has not been started yet.
///
/// Logs are append-only and never rotated, so the file is scanned
/// backwards in fixed chunks rather than read whole.
pub fn tail(log_path: &Path, max_lines: usize) -> io::Result<String> {
	use std::io::{Read, Seek, SeekFrom};

	const CHUNK: u64 = 64 * 1024;

	let mut file = match std::fs::File::open(log_path) {
		Ok(f) => f,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(String::new()),
		Err(e) => return Err(e),
	};
	let mut pos = file.metadata()?.len();
	let mut buf: Vec<u8> = Vec::new();
	let mut newlines = 0usize;

	while pos > 0 && newlines <= max_lines {
		let read_len = CHUNK.min(pos);
		pos -= read_len;
		file.seek(SeekFrom::Start(pos))?;
		let mut chunk = vec![0u8; read_len as usize];
		file.read_exact(&mut chunk)?;
		newlines += chunk.iter().filter(|&&b| b == b'\n').count();
		chunk.extend_from_slice(&buf);
		buf = chunk;
	}

	let text = String::from_utf8_lossy(&buf);
	let lines: Vec<&str> = text.lines().collect();
	let start = lines.len().saturating_sub(max_lines);
	Ok(lines[start..].join("\n"))
}

/// "YYYY-MM-DD HH:MM:SS" in UTC, without pulling in a datetime crate.
pub fn now_timestamp() -> String {
	let secs = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0);
	let (y, m, d, hh, mm, ss) = secs_to_datetime(secs);
	format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, m, d, hh, mm, ss)
}

/// Unix seconds to UTC civil datetime (civil_from_days algorithm).
fn secs_to_datetime(secs: u64) -> (u32, u32, u32, u32, u32, u32) {
	let days = (secs / 86400) as i64;
	let time_of_day = secs % 86400;
	let hour = (time_of_day / 3600) as u32;
	let minute = ((time_of_day % 3600) / 60) as u32;
	let second = (time_of_day % 60) as u32;

	let z = days + 719468;
	let era = if z >= 0 { z } else { z - 146096 } / 146097;
	let doe = (z - era * 146097) as u32;
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let y = yoe as i64 + era * 400;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 { mp + 3 } else { mp - 9 };
	let y = if m <= 2 { y + 1 } else { y };

	(y as u32, m, d, hour, minute, second)
}
