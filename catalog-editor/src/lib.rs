//! Catalog Editor - product list synchronization engine
//!
//! # 模块结构
//!
//! ```text
//! catalog-editor/src/
//! ├── core/          # store, projector, controller, collaborators, config
//! └── utils/         # logger, text helpers
//! ```

pub mod core;
pub mod utils;

// Re-export workspace crates for hosts
pub use catalog_client;
pub use shared;

pub use core::{Config, Outcome, SyncController};
pub use utils::logger::{init_logger, init_logger_with_file};

use tracing_appender::non_blocking::WorkerGuard;

/// 设置环境: load `.env`, read config, start logging
///
/// The returned guard keeps file logging alive and must outlive the program.
pub fn setup_environment() -> (Config, Option<WorkerGuard>) {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let config = Config::from_env();
    let guard = init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    if dotenv_loaded {
        tracing::debug!("Loaded .env");
    }
    (config, guard)
}
