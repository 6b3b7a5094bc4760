//! Subdomain wordlists and nameserver files.
//!
//! Both file formats hold one entry per line. Surrounding whitespace is
//! trimmed, and blank lines and `#` comments are skipped.

use std::net::IpAddr;
use std::path::Path;

use log::debug;

use crate::error_handling::WordlistError;

const DEFAULT_LIST: &str = include_str!("../lists/default.txt");

/// Splits wordlist text into entries.
pub fn parse_wordlist(text: &str) -> Vec<String> {
    entries(text).map(|(_, entry)| entry.to_string()).collect()
}

/// Bundled subdomain list used when none is given.
pub fn default_subdomains() -> Vec<String> {
    parse_wordlist(DEFAULT_LIST)
}

/// Reads a subdomain wordlist.
///
/// # Errors
///
/// Returns `WordlistError::Io` if the file cannot be read.
pub async fn load_subdomains(path: &Path) -> Result<Vec<String>, WordlistError> {
    let text = read(path).await?;
    let subdomains = parse_wordlist(&text);
    debug!("Loaded {} subdomains from {}", subdomains.len(), path.display());
    Ok(subdomains)
}

/// Reads a file of nameserver addresses.
///
/// # Errors
///
/// Returns `WordlistError::Io` if the file cannot be read, or
/// `WordlistError::InvalidAddress` for the first line that is not an IP address.
pub async fn load_nameservers(path: &Path) -> Result<Vec<IpAddr>, WordlistError> {
    let text = read(path).await?;
    entries(&text)
        .map(|(line, entry)| {
            entry
                .parse::<IpAddr>()
                .map_err(|_| WordlistError::InvalidAddress {
                    path: path.to_path_buf(),
                    line,
                    value: entry.to_string(),
                })
        })
        .collect()
}

async fn read(path: &Path) -> Result<String, WordlistError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WordlistError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Non-empty, non-comment entries with their 1-based line numbers.
fn entries(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, entry)| !entry.is_empty() && !entry.starts_with('#'))
}
