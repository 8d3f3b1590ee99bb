use env_logger::Env;
use std::io::Write;

const PROGRAM: &str = "fqconv";

/// Installs the stderr logger.
///
/// Lines read `[fqconv 2024-01-31 12:00:00] info: message`. Silent runs keep
/// warnings and errors only; `RUST_LOG` takes precedence over both defaults.
pub fn init(silent: bool) {
    let default_filter = if silent { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}: {}",
                PROGRAM,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .init();
}
