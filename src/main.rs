//! `cmdkit` 바이너리 진입점.

use cmdkit::ConsoleOutput;
use cmdkit::interface::composition::AppComposition;

fn main() {
    let composition = match AppComposition::load() {
        Ok(composition) => composition,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| composition.config().log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = composition.registry().and_then(|registry| {
        registry.run(std::env::args(), Box::new(ConsoleOutput::stdout()))
    });

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
