use std::panic;
use std::process::ExitCode;

/// Replace the default hook so a panic prints one line instead of a trace.
fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown failure".to_string()
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_default();
        tracing::debug!(%location, "panic");

        eprintln!("Error: the CLI stopped unexpectedly: {}", msg);
    }));
}

fn main() -> ExitCode {
    install_panic_hook();

    match panic::catch_unwind(prisma_cli::cli::run) {
        Ok(code) => code,
        Err(_) => ExitCode::FAILURE,
    }
}
