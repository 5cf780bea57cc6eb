use std::net::Ipv4Addr;

use pnet::datalink;
use pnet::ipnetwork::IpNetwork;

/// Snapshot of one system interface and its bound IPv4 addresses.
/// Other address families are dropped at enumeration time.
#[derive(Debug, Clone)]
pub struct InterfaceAddrs {
    pub name: String,
    pub ipv4: Vec<Ipv4Addr>,
}

impl std::fmt::Display for InterfaceAddrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ipv4.is_empty() {
            return write!(f, "{}: (no IPv4)", self.name);
        }
        let addrs: Vec<String> = self.ipv4.iter().map(|ip| ip.to_string()).collect();
        write!(f, "{}: {}", self.name, addrs.join(", "))
    }
}

/// Enumerate all system network interfaces with their IPv4 addresses.
///
/// Returns a read-only snapshot taken now; nothing is cached. Interfaces
/// without any IPv4 address are still included so diagnostics can show
/// them, but they contribute no send sources to a dispatch pass.
pub fn enumerate_interfaces() -> Vec<InterfaceAddrs> {
    datalink::interfaces()
        .into_iter()
        .map(|iface| {
            let ipv4 = iface
                .ips
                .iter()
                .filter_map(|net| match net {
                    IpNetwork::V4(v4) => Some(v4.ip()),
                    IpNetwork::V6(_) => None,
                })
                .collect();
            InterfaceAddrs {
                name: iface.name,
                ipv4,
            }
        })
        .collect()
}
