use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Addresses already handed out for reverse resolution during a scan.
///
/// Subdomains on the same subnet produce overlapping expansions; this keeps
/// each address from being probed more than once.
#[derive(Debug, Default)]
pub struct VisitedIps {
    seen: HashSet<Ipv4Addr>,
}

impl VisitedIps {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the addresses not seen before, in input order, and marks them seen.
    pub fn unvisited<I: IntoIterator<Item = Ipv4Addr>>(&mut self, ips: I) -> Vec<Ipv4Addr> {
        ips.into_iter().filter(|ip| self.seen.insert(*ip)).collect()
    }

    /// Number of distinct addresses seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
