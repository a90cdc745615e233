use std::env;

use estoque::app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Default bind address, overridable as the first argument
    let addr = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());

    // Start the web application
    app::run(&addr).await
}
