//! rdns-lookup - reverse DNS queries over IP ranges, uploaded as a CSV
//! lookup file.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    rdns_cli::run().await
}
