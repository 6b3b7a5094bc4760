//! IP range expansion.
//!
//! Given an address discovered for a subdomain, produce the neighboring
//! addresses to reverse-resolve. Both strategies stay inside the address's
//! /24 block: the last octet never wraps into a neighboring block.

use std::net::Ipv4Addr;

/// Addresses within `expand` of `ip`, clamped to the containing /24.
///
/// The window is `ip - expand ..= ip + expand` on the last octet, cut at 0
/// and 255, so it is asymmetric near the edges of the block.
///
/// # Arguments
///
/// * `ip` - The discovered address
/// * `expand` - Number of neighbors on each side
///
/// # Returns
///
/// The addresses in ascending order. `expand = 0` yields `[ip]`.
pub fn traverse_expander(ip: Ipv4Addr, expand: u32) -> Vec<Ipv4Addr> {
    let [a, b, c, last] = ip.octets();
    let expand = u8::try_from(expand).unwrap_or(u8::MAX);
    let low = last.saturating_sub(expand);
    let high = last.saturating_add(expand);
    (low..=high).map(|d| Ipv4Addr::new(a, b, c, d)).collect()
}

/// Every address of the /24 containing `ip`, `.0` through `.255`.
pub fn wide_expander(ip: Ipv4Addr) -> Vec<Ipv4Addr> {
    let [a, b, c, _] = ip.octets();
    (0..=u8::MAX).map(|d| Ipv4Addr::new(a, b, c, d)).collect()
}

/// Expansion strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expander {
    /// Bounded neighborhood of the given radius
    Traverse(u32),
    /// Whole /24
    Wide,
}

impl Expander {
    /// Expands `ip` with this strategy.
    pub fn expand(&self, ip: Ipv4Addr) -> Vec<Ipv4Addr> {
        match *self {
            Expander::Traverse(radius) => traverse_expander(ip, radius),
            Expander::Wide => wide_expander(ip),
        }
    }
}

impl Default for Expander {
    fn default() -> Self {
        Expander::Traverse(crate::config::DEFAULT_TRAVERSE)
    }
}
