mod cli;
mod clipboard;

use clap::Parser;

use cli::Cli;

fn main() {
    env_logger::init();
    log::info!("GastroGuru starting");

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(cli::run(cli)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
