//! Domain name model.
//!
//! A [`DomainName`] is an ordered sequence of labels, most specific first,
//! plus a flag recording whether the name is absolute (terminated by the
//! implicit root label). The root itself is the absolute name with no labels.
//!
//! Key functions:
//! - `concatenate_subdomains()` - Prepends subdomain labels to a base domain
//! - `DomainName::parent()` - Strips the leftmost label (ascent)

use std::fmt;
use std::str::FromStr;

use crate::error_handling::DomainNameError;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// A domain name as a sequence of labels.
///
/// Immutable: every operation returns a new value. Labels compare
/// case-insensitively.
#[derive(Debug, Clone, Eq)]
pub struct DomainName {
    labels: Vec<String>,
    absolute: bool,
}

impl DomainName {
    /// Parses a domain name from text.
    ///
    /// A trailing dot makes the name absolute. `"."` is the root.
    ///
    /// # Errors
    ///
    /// Returns `DomainNameError` for empty input, empty labels, labels longer
    /// than 63 octets, or names longer than 255 octets in wire form.
    pub fn parse(text: &str) -> Result<Self, DomainNameError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainNameError::Empty);
        }
        if text == "." {
            return Ok(Self::root());
        }

        let (body, absolute) = match text.strip_suffix('.') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let labels = split_labels(body, text)?;
        Self::from_parts(labels, absolute)
    }

    /// The root name (`.`).
    pub fn root() -> Self {
        Self {
            labels: Vec::new(),
            absolute: true,
        }
    }

    /// Builds an absolute name from labels, most specific first.
    ///
    /// # Errors
    ///
    /// Returns `DomainNameError` if any label is empty or too long, or if the
    /// name is too long.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, DomainNameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let joined = labels.join(".");
        for label in &labels {
            check_label(label, &joined)?;
        }
        Self::from_parts(labels, true)
    }

    fn from_parts(labels: Vec<String>, absolute: bool) -> Result<Self, DomainNameError> {
        // One length octet per label plus the terminating root octet.
        let wire_len = labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1;
        if wire_len > MAX_NAME_LEN {
            return Err(DomainNameError::NameTooLong(wire_len));
        }
        Ok(Self { labels, absolute })
    }

    /// Labels, most specific first. Excludes the implicit root label.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels, excluding the implicit root label.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Whether the name is terminated by the root label.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.absolute && self.labels.is_empty()
    }

    /// Returns the absolute form of this name.
    pub fn to_absolute(&self) -> Self {
        Self {
            labels: self.labels.clone(),
            absolute: true,
        }
    }

    /// Strips the leftmost label. Returns `None` once no labels remain.
    pub fn parent(&self) -> Option<Self> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Self {
            labels: self.labels[1..].to_vec(),
            absolute: self.absolute,
        })
    }

    /// Whether `self` is `other` or lies beneath it.
    pub fn is_subdomain_of(&self, other: &DomainName) -> bool {
        if other.labels.len() > self.labels.len() {
            return false;
        }
        let offset = self.labels.len() - other.labels.len();
        self.labels[offset..]
            .iter()
            .zip(&other.labels)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
            && self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(if self.absolute { "." } else { "" });
        }
        f.write_str(&self.labels.join("."))?;
        if self.absolute {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = DomainNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainName::parse(s)
    }
}

/// Prepends subdomain labels to a base domain.
///
/// Each entry may itself hold several dot-separated labels (`"sd1.sd2"`) and
/// may carry a trailing dot. All labels are flattened in the order given and
/// placed before the base domain's labels. The base is made absolute first.
///
/// # Arguments
///
/// * `domain` - The base domain
/// * `subdomains` - Subdomain strings, outermost-first order preserved
///
/// # Returns
///
/// The combined absolute name; the normalized base when `subdomains` is empty.
///
/// # Errors
///
/// Returns `DomainNameError` if a subdomain holds an empty or overlong label,
/// or if the result exceeds 255 octets. An entry that is blank or just `"."`
/// counts as an empty label; pass an empty slice to get the base name back.
pub fn concatenate_subdomains<S: AsRef<str>>(
    domain: &DomainName,
    subdomains: &[S],
) -> Result<DomainName, DomainNameError> {
    let mut labels = Vec::new();
    for subdomain in subdomains {
        let text = subdomain.as_ref().trim();
        let body = text.strip_suffix('.').unwrap_or(text);
        if body.is_empty() {
            return Err(DomainNameError::EmptyLabel(text.to_string()));
        }
        labels.extend(split_labels(body, text)?);
    }
    labels.extend(domain.labels.iter().cloned());
    DomainName::from_parts(labels, true)
}

fn split_labels(body: &str, whole: &str) -> Result<Vec<String>, DomainNameError> {
    body.split('.')
        .map(|label| check_label(label, whole).map(|_| label.to_string()))
        .collect()
}

fn check_label(label: &str, whole: &str) -> Result<(), DomainNameError> {
    if label.is_empty() {
        return Err(DomainNameError::EmptyLabel(whole.to_string()));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(DomainNameError::LabelTooLong {
            label: label.to_string(),
            len: label.len(),
        });
    }
    Ok(())
}
