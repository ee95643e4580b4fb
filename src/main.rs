#[tokio::main]
async fn main() {
    if let Err(err) = healthvault::run().await {
        eprintln!("healthvault: {err}");
        std::process::exit(1);
    }
}
