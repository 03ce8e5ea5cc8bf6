#[tokio::main]
async fn main() {
    if let Err(e) = nutritrack_lib::run().await {
        // Logging may not be up yet if configuration failed.
        eprintln!("nutritrack: {}", e);
        std::process::exit(1);
    }
}
