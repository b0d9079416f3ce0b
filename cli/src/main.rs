use clap::Parser;

mod app;
mod commands;
mod logging;

use commands::cli;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    let guard = match logging::init(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialise logging: {e}");
            std::process::exit(1);
        }
    };

    let code = match app::dispatch(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("Error: {e}");
            1
        }
    };

    drop(guard);
    std::process::exit(code);
}
