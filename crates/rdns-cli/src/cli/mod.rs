//! CLI argument parsing and the lookup pipeline.

pub mod args;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use futures_util::StreamExt;
use tracing::{debug, info};

use args::Cli;
use rdns_client::UploadClient;
use rdns_core::AddrRange;

use crate::report::CsvReport;
use crate::resolver::PtrResolver;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.filename.ends_with(".csv") {
        bail!("filename must end with .csv");
    }

    if cli.user.is_some() && cli.pass.is_none() {
        bail!("password must be set if username is set");
    }

    // Fail fast: every range argument is parsed before the first lookup,
    // so malformed input never produces a partial result set.
    let ranges = expand_ranges(&cli.ranges)?;

    let mut builder =
        UploadClient::builder(&cli.url).timeout(Duration::from_secs(cli.timeout));
    if let Some(pass) = &cli.pass {
        builder = builder.credentials(cli.user.clone(), pass);
    }
    let client = builder.build()?;

    let resolver = PtrResolver::new();
    let mut report = CsvReport::new()?;

    let mut hits: u64 = 0;
    let mut misses: u64 = 0;

    for range in &ranges {
        debug!(%range, "resolving range");

        let resolver_ref = &resolver;
        let mut results = futures_util::stream::iter(range.iter())
            .map(|addr| async move { (addr, resolver_ref.reverse(addr).await) })
            .buffered(cli.concurrency.max(1));

        while let Some((addr, hostname)) = results.next().await {
            match hostname {
                Some(hostname) => {
                    report.record(addr, &hostname)?;
                    hits += 1;
                }
                None => misses += 1,
            }
        }
    }

    info!(hits, misses, "resolution finished");

    let staged = report.finish()?;
    client
        .upload_lookup_file(&cli.repo, &cli.filename, staged.path())
        .await
        .with_context(|| {
            format!("uploading {} to repository {}", cli.filename, cli.repo)
        })?;

    println!(
        "Uploaded {hits} entries as {} to repository {}",
        cli.filename, cli.repo
    );

    Ok(())
}

/// Parse the range arguments, expanding `@file` entries line by line.
///
/// Blank lines and `#` comments in range files are skipped; any other
/// unparseable line aborts the whole batch.
fn expand_ranges(args: &[String]) -> Result<Vec<AddrRange>> {
    let mut ranges = Vec::new();

    for arg in args {
        if let Some(path) = arg.strip_prefix('@') {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading range file '{path}'"))?;

            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                ranges.push(
                    AddrRange::parse(line)
                        .with_context(|| format!("parsing range in '{path}'"))?,
                );
            }
        } else {
            ranges.push(
                AddrRange::parse(arg).with_context(|| format!("parsing range '{arg}'"))?,
            );
        }
    }

    Ok(ranges)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn expands_plain_range_arguments() {
        let args = vec!["1.2.3.4".to_string(), "10.0.0.0/30".to_string()];
        let ranges = expand_ranges(&args).unwrap();

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].size(), Some(1));
        assert_eq!(ranges[1].size(), Some(4));
    }

    #[test]
    fn expands_range_files_skipping_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# office networks").unwrap();
        writeln!(file, "192.168.0.0/30").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  10.0.0.1-10.0.0.3  ").unwrap();
        file.flush().unwrap();

        let args = vec![format!("@{}", file.path().display())];
        let ranges = expand_ranges(&args).unwrap();

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].size(), Some(4));
        assert_eq!(ranges[1].size(), Some(3));
    }

    #[test]
    fn bad_line_in_range_file_aborts_the_batch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "192.168.0.0/24").unwrap();
        writeln!(file, "not-a-range").unwrap();
        file.flush().unwrap();

        let args = vec![format!("@{}", file.path().display())];
        let err = expand_ranges(&args).unwrap_err();
        assert!(err.to_string().contains("parsing range in"));
    }

    #[test]
    fn missing_range_file_is_an_error() {
        let args = vec!["@/no/such/file".to_string()];
        assert!(expand_ranges(&args).is_err());
    }
}
