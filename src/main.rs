//! `agentspace-registrar` 바이너리 진입점.

use std::io;

use agentspace_registrar::infrastructure::adapters::ConsoleReporter;
use agentspace_registrar::interface::cli::{AppComposition, Cli, print_outcome, report_error};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let action = Cli::parse_action();

    let directives = log_directives(action.verbose, std::env::var("RUST_LOG").ok());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    debug!(command = ?action.command, config = %action.config_path.display(), "starting");

    let reporter = ConsoleReporter::new();
    let composition = AppComposition::new(&action);

    let result = match composition.execute(&action).await {
        Ok(outcome) => print_outcome(&outcome, action.output, &mut io::stdout(), &reporter),
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        report_error(&err, &reporter);
        std::process::exit(1);
    }
}

/// `-v`는 RUST_LOG보다 우선한다. 둘 다 없으면 `warn`.
fn log_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

#[cfg(test)]
mod tests {
    use super::log_directives;

    #[test]
    fn verbose_overrides_rust_log() {
        assert_eq!(log_directives(true, Some("error".into())), "debug");
        assert_eq!(log_directives(true, None), "debug");
    }

    #[test]
    fn rust_log_applies_without_verbose() {
        assert_eq!(log_directives(false, Some("reqwest=trace".into())), "reqwest=trace");
        assert_eq!(log_directives(false, Some(" ".into())), "warn");
        assert_eq!(log_directives(false, None), "warn");
    }
}
