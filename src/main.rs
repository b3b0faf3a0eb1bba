use autodeck::cli;
use autodeck::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let code = cli::main().await;
    std::process::exit(code);
}
