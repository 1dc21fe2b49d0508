//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `memo_core` linkage, configuration and database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use log::info;
use memo_core::db::migrations::{current_version, latest_version};
use memo_core::CoreConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memo_core ping={}", memo_core::ping());
    println!("memo_core version={}", memo_core::core_version());

    let config = CoreConfig::from_env();
    match config.init_logging() {
        Ok(enabled) => println!("memo_core logging={}", if enabled { "on" } else { "off" }),
        Err(err) => {
            eprintln!("memo_core logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let conn = match config.open_db() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "memo_core db open failed path={}: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    match current_version(&conn) {
        Ok(version) => {
            println!("memo_core db_path={}", config.db_path.display());
            println!("memo_core schema_version={version} latest={}", latest_version());
            info!("event=cli_probe module=cli status=ok schema_version={version}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("memo_core schema check failed: {err}");
            ExitCode::FAILURE
        }
    }
}
