//! Native replay driver entry point.

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();
    let cli = rasterpad_app::cli::Cli::parse();
    log::info!("Starting Rasterpad");

    match rasterpad_app::cli::run(&cli) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
