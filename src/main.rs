#[tokio::main]
async fn main() {
    if let Err(e) = top250_crawler::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
