//! Primary network interface discovery.

use std::net::Ipv4Addr;

use super::source::MetricsSource;

/// Text shown in place of an address when no candidate has one.
pub const NO_ADDRESS: &str = "none";

/// Interface picked by [`discover_primary_interface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryInterface {
    pub name: String,
    pub address: Ipv4Addr,
}

impl PrimaryInterface {
    /// Display form of an optional discovery result.
    pub fn address_label(found: Option<&PrimaryInterface>) -> String {
        found
            .map(|primary| primary.address.to_string())
            .unwrap_or_else(|| NO_ADDRESS.to_string())
    }
}

/// Walk `candidates` in priority order and return the first interface holding a
/// non-loopback IPv4 address.
///
/// Unknown interfaces and lookup errors just move on to the next candidate.
pub fn discover_primary_interface<S>(
    source: &mut S,
    candidates: &[String],
) -> Option<PrimaryInterface>
where
    S: MetricsSource + ?Sized,
{
    for name in candidates {
        match source.interface_ipv4(name) {
            Ok(Some(address)) if is_usable(address) => {
                return Some(PrimaryInterface {
                    name: name.clone(),
                    address,
                });
            }
            Ok(_) => continue,
            Err(e) => {
                log::debug!("Skipping interface {}: {}", name, e);
                continue;
            }
        }
    }
    None
}

fn is_usable(address: Ipv4Addr) -> bool {
    !address.is_loopback() && !address.is_unspecified()
}
