//! Command-line argument definitions using clap.

use clap::Parser;

const RANGE_HELP: &str = "\
Ranges can be specified as
 - a single address, i.e. \"192.168.0.1\"
 - CIDR notation, i.e. \"192.168.0.0/24\"
 - a range, i.e. \"192.168.0.0-192.168.0.10\". The range is inclusive.
 - @file, i.e. \"@path/to/file\". The file will be read and each line will
   be interpreted as one of the above.

Both IPv4 and IPv6 addresses are supported.

Example:

Do RDNS queries against 192.168.0.0 to 192.168.0.255 (inclusive) and any
ranges found in the \"ranges.txt\" file, and upload the results to a file
called \"rdns.csv\" in the repo called \"myRepo\" on the EU cloud:

  rdns-lookup https://cloud.humio.com myRepo rdns.csv 192.168.0.0/24 @ranges.txt \\
    --pass L87v9i4J5S6S4i7xsGlw";

/// Does reverse DNS queries against a range of IP addresses and uploads
/// the results to a cluster as a lookup file
#[derive(Parser, Debug)]
#[command(name = "rdns-lookup")]
#[command(author, version, about, after_help = RANGE_HELP)]
pub struct Cli {
    /// URL of the cluster to upload to
    pub url: String,

    /// The repository in the cluster to upload to
    pub repo: String,

    /// The filename in the repository to upload to (must end with .csv)
    pub filename: String,

    /// The IP ranges for which to perform reverse DNS
    #[arg(required = true)]
    pub ranges: Vec<String>,

    /// Username to use when authenticating
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Password (or token) to use when authenticating
    #[arg(short = 'p', long, env = "RDNS_TOKEN", hide_env_values = true)]
    pub pass: Option<String>,

    /// Maximum number of in-flight PTR queries
    #[arg(short = 'c', long, default_value_t = 16)]
    pub concurrency: usize,

    /// Upload timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,
}
