use crate::error::Error;
use ipnetwork::IpNetwork;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

/// Bootstrap configuration supplied once at process start.
///
/// Per-challenge configuration arrives inline on each
/// [`ChallengeRequest`][`crate::api::model::ChallengeRequest`] instead, and is
/// decoded by [`crate::solver::load_config`].
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// Path to the JSON secret store holding DNS provider credentials.
    pub secrets_path: String,
    /// Recursive nameservers used for authoritative zone discovery. When
    /// empty the host's resolver configuration is used.
    #[serde(default)]
    pub recursive_nameservers: Vec<SocketAddr>,
}

lazy_static! {
    // NOTE(XXX): Once the "ip" feature has stabilized we can use Ipv6Addr.is_unique_local[0].
    //            Presently this feature is unstable so we home-roll. See also RFC 4193[1].
    // [0]: https://doc.rust-lang.org/std/net/struct.Ipv6Addr.html#method.is_unique_local
    // [1]: https://www.rfc-editor.org/rfc/rfc4193.html
    static ref IPV6_UNIQUE_LOCAL_NETWORK: IpNetwork = IpNetwork::from_str("fc00::/7").unwrap();
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.bind_addr_is_secure()?;
        Ok(conf)
    }

    fn bind_addr_is_secure(&self) -> Result<(), Error> {
        match self.api_bind_addr {
            SocketAddr::V4(v4_addr) => {
                let ip = v4_addr.ip();
                if !ip.is_loopback() && !ip.is_private() {
                    return Err(Error::InsecureApiBind(IpAddr::V4(*ip)));
                }
                Ok(())
            }
            SocketAddr::V6(v6_addr) => {
                let ip = v6_addr.ip();
                if !ip.is_loopback() && !IPV6_UNIQUE_LOCAL_NETWORK.contains(IpAddr::V6(*ip)) {
                    return Err(Error::InsecureApiBind(IpAddr::V6(*ip)));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_config_from_file() {
        let f = write_config(
            r#"{
                "api_bind_addr": "127.0.0.1:8443",
                "api_timeout": 30,
                "secrets_path": "/etc/dnspod-webhook/secrets.json",
                "recursive_nameservers": ["1.1.1.1:53"]
            }"#,
        );
        let config = Config::try_from_file(f.path()).unwrap();
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert_eq!(config.recursive_nameservers.len(), 1);
    }

    #[test]
    fn nameservers_default_to_empty() {
        let f = write_config(
            r#"{
                "api_bind_addr": "10.0.0.2:8443",
                "api_timeout": 30,
                "secrets_path": "secrets.json"
            }"#,
        );
        let config = Config::try_from_file(f.path()).unwrap();
        assert!(config.recursive_nameservers.is_empty());
    }

    #[test]
    fn rejects_public_bind_addr() {
        let f = write_config(
            r#"{
                "api_bind_addr": "93.184.216.34:8443",
                "api_timeout": 30,
                "secrets_path": "secrets.json"
            }"#,
        );
        let err = Config::try_from_file(f.path()).unwrap_err();
        assert!(matches!(err, Error::InsecureApiBind(_)));
    }
}
