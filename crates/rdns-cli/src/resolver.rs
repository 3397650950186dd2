//! Reverse DNS (PTR) resolution.

use std::net::IpAddr;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

/// PTR resolver over the default DNS configuration
pub struct PtrResolver {
    resolver: TokioAsyncResolver,
}

impl Default for PtrResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PtrResolver {
    /// Create a resolver using default configuration
    #[must_use]
    pub fn new() -> Self {
        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        Self { resolver }
    }

    /// First PTR name for `addr`, without the trailing root dot
    ///
    /// `None` when the address has no PTR record. Transient resolver
    /// failures are also treated as misses (traced at debug level): an
    /// unresolvable address is the common case in a sweep and must not
    /// abort it.
    pub async fn reverse(&self, addr: IpAddr) -> Option<String> {
        match self.resolver.reverse_lookup(addr).await {
            Ok(response) => response.iter().next().map(|name| {
                let mut name = name.to_string();
                if name.ends_with('.') {
                    name.pop();
                }
                name
            }),
            Err(e) => {
                if !matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    debug!(%addr, error = %e, "PTR lookup failed");
                }
                None
            }
        }
    }
}
