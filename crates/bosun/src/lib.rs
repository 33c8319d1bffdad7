//! # bosun
//!
//! Local multi-service process supervisor.
//!
//! Starts, stops, restarts, and reports on a fixed set of named
//! long-running processes (an API server, a worker, a web front end) that
//! together form one deployment on one host. Children run detached in
//! their own process groups with output appended to per-service log
//! files, and the last known pid of each service is persisted so a later
//! supervisor invocation can pick the fleet back up.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bosun::{Supervisor, Op};
//! use bosun_core::{Config, ServiceDef};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = Config::new("/var/run/myapp", vec![ServiceDef {
//!     name: "api".into(),
//!     command: "python manage.py runserver 0.0.0.0:8000".into(),
//!     dir: "/srv/app/backend".into(),
//!     env: Default::default(),
//!     port: Some(8000),
//!     startup_grace_ms: 3000,
//!     requires: vec![],
//!     pattern: Some("manage.py runserver".into()),
//! }]);
//!
//! let sup = Supervisor::new(config);
//! for result in sup.start_all().await {
//!     println!("{}: {}", result.name, result.message);
//! }
//! # }
//! ```
//!
//! Running two supervisor invocations against the same state directory
//! concurrently is undefined behavior; operations are best-effort
//! idempotent, not lock-protected.

pub mod error;
pub mod launch;
pub mod logs;
pub mod pidfile;
pub mod probe;
pub mod supervisor;
pub mod terminate;

pub use error::OpError;
pub use pidfile::PidStore;
pub use supervisor::{Op, Report, Supervisor};
