use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let code = arena_cli::run(args, &mut io::stdout(), &mut io::stderr());
    ExitCode::from(code as u8)
}
