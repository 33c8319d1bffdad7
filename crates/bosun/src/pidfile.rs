use std::io;
use std::path::PathBuf;

/// On-disk pid records, one `<service>.pid` file per service. This is the
/// only component that writes the pid directory. A stored pid says nothing
/// about liveness; corroborate with [`crate::probe::is_alive`].
#[derive(Debug, Clone)]
pub struct PidStore {
	dir: PathBuf,
}

impl PidStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn path(&self, service: &str) -> PathBuf {
		self.dir.join(format!("{}.pid", service))
	}

	/// Absent or unparsable content is `Ok(None)`; only real I/O faults
	/// (permissions, bad disk) surface, and callers report UNKNOWN for those.
	pub fn read(&self, service: &str) -> io::Result<Option<u32>> {
		match std::fs::read_to_string(self.path(service)) {
			Ok(content) => Ok(content.trim().parse().ok()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e),
		}
	}

	pub fn write(&self, service: &str, pid: u32) -> io::Result<()> {
		std::fs::create_dir_all(&self.dir)?;
		std::fs::write(self.path(service), pid.to_string())
	}

	/// No-op if the file is already gone.
	pub fn clear(&self, service: &str) -> io::Result<()> {
		match std::fs::remove_file(self.path(service)) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

	fn temp_store() -> (PidStore, PathBuf) {
		let n = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
		let dir = std::env::temp_dir().join(format!("bosun-pidstore-{}-{}", std::process::id(), n));
		(PidStore::new(&dir), dir)
	}

	#[test]
	fn read_missing_is_none() {
		let (store, dir) = temp_store();
		assert_eq!(store.read("api").unwrap(), None);
		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn write_then_read() {
		let (store, dir) = temp_store();
		store.write("api", 4242).unwrap();
		assert_eq!(store.read("api").unwrap(), Some(4242));
		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn garbage_content_is_none() {
		let (store, dir) = temp_store();
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(store.path("api"), "not a pid\n").unwrap();
		assert_eq!(store.read("api").unwrap(), None);
		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn clear_is_idempotent() {
		let (store, dir) = temp_store();
		store.write("api", 1).unwrap();
		store.clear("api").unwrap();
		assert_eq!(store.read("api").unwrap(), None);
		// second clear: file gone, still fine
		store.clear("api").unwrap();
		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn overwrite_replaces_pid() {
		let (store, dir) = temp_store();
		store.write("api", 1).unwrap();
		store.write("api", 2).unwrap();
		assert_eq!(store.read("api").unwrap(), Some(2));
		let _ = std::fs::remove_dir_all(&dir);
	}
}
