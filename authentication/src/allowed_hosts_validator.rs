use crate::error::AuthenticationError;
use std::collections::HashSet;
use url::{Host, Url};


/// Hosts an authentication provider may attach credentials for.
///
/// An empty set allows every host. Entries are stored in the form [`Url::host_str`]
/// reports: lower-cased, internationalized names in punycode, IPv6 in brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHostsValidator {
  allowed_hosts: HashSet<String>,
}

impl AllowedHostsValidator {
  pub fn new<I, S>(allowed_hosts: I) -> Result<Self, AuthenticationError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>, {
    Ok(Self {
      allowed_hosts: normalize_hosts(allowed_hosts)?,
    })
  }

  /// Sorted copy of the allowed hosts.
  pub fn allowed_hosts(&self) -> Vec<String> {
    let mut hosts = self.allowed_hosts.iter().cloned().collect::<Vec<_>>();
    hosts.sort();
    hosts
  }

  /// Replaces the allowed hosts. On error the current set is kept.
  pub fn set_allowed_hosts<I, S>(&mut self, allowed_hosts: I) -> Result<(), AuthenticationError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>, {
    self.allowed_hosts = normalize_hosts(allowed_hosts)?;
    tracing::debug!("Allowed hosts updated: count = {}", self.allowed_hosts.len());
    Ok(())
  }

  pub fn is_url_host_valid(&self, url: &Url) -> bool {
    if self.allowed_hosts.is_empty() {
      return true;
    }
    match url.host_str() {
      Some(host) => self.allowed_hosts.contains(host),
      None => false,
    }
  }

  /// Parses `uri` and checks its host. An unparsable URI is an [`AuthenticationError::InvalidArgument`].
  pub fn is_host_valid(&self, uri: &str) -> Result<bool, AuthenticationError> {
    let url =
      Url::parse(uri.trim()).map_err(|err| AuthenticationError::of_invalid_argument(format!("invalid uri {}: {}", uri, err)))?;
    Ok(self.is_url_host_valid(&url))
  }
}

fn normalize_hosts<I, S>(allowed_hosts: I) -> Result<HashSet<String>, AuthenticationError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>, {
  let mut hosts = HashSet::new();
  for host in allowed_hosts {
    let host = host.as_ref().trim().to_ascii_lowercase();
    if host.is_empty() {
      continue;
    }
    if host.starts_with("http://") || host.starts_with("https://") {
      return Err(AuthenticationError::of_invalid_argument(
        "host should not contain http or https prefix",
      ));
    }
    let host = Host::parse(&host)
      .map_err(|err| AuthenticationError::of_invalid_argument(format!("invalid host {}: {}", host, err)))?;
    hosts.insert(host.to_string());
  }
  Ok(hosts)
}
