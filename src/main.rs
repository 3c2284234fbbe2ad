use paperforge::cli;
use paperforge::logger;
use paperforge::ui;

#[tokio::main]
async fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = cli::main().await {
        ui::print_error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
