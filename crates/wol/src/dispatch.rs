use std::io;
use std::net::{Ipv4Addr, UdpSocket};

use crate::network::{enumerate_interfaces, InterfaceAddrs};
use crate::wol::{MacAddress, MagicPacket, WolError};

/// One (interface, local IPv4 address) pair a packet will be sent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSource {
    pub interface: String,
    pub addr: Ipv4Addr,
}

/// Result of one send attempt. Failures are recorded here, never
/// propagated: a pair with no route must not stop the remaining pairs.
#[derive(Debug)]
pub struct SendOutcome {
    pub source: SendSource,
    pub result: io::Result<()>,
}

/// Select the local send sources for a dispatch pass.
///
/// With no filter every (interface, IPv4 address) pair participates. With a
/// filter only exact interface-name matches do; a filter that matches
/// nothing yields an empty list, which is not an error.
pub fn select_sources(snapshot: &[InterfaceAddrs], filter: Option<&str>) -> Vec<SendSource> {
    let mut sources = Vec::new();
    for iface in snapshot {
        if let Some(wanted) = filter {
            if iface.name != wanted {
                continue;
            }
        }
        for addr in &iface.ipv4 {
            sources.push(SendSource {
                interface: iface.name.clone(),
                addr: *addr,
            });
        }
    }
    sources
}

/// Send `packet` once per source, binding each send to the source address.
///
/// The explicit per-address bind is what makes the interface filter
/// meaningful on multi-homed hosts: the broadcast originates from that
/// subnet instead of whatever the OS would route by default. Each socket
/// lives for exactly one send.
pub fn dispatch(
    packet: &MagicPacket,
    broadcast: &str,
    port: u16,
    sources: &[SendSource],
) -> Vec<SendOutcome> {
    sources
        .iter()
        .map(|source| {
            let result = send_from(packet, source.addr, broadcast, port);
            if let Err(err) = &result {
                log::warn!(
                    "send from {} ({}) failed: {}",
                    source.addr,
                    source.interface,
                    err
                );
            }
            SendOutcome {
                source: source.clone(),
                result,
            }
        })
        .collect()
}

fn send_from(packet: &MagicPacket, local: Ipv4Addr, broadcast: &str, port: u16) -> io::Result<()> {
    let socket = UdpSocket::bind((local, 0))?;
    socket.set_broadcast(true)?;
    socket.send_to(packet.as_bytes(), (broadcast, port))?;
    Ok(())
}

/// Parse `mac_text`, build the magic packet and fan it out over every
/// local interface/address pair passing `interface` (None = all).
///
/// Per-pair send failures are reported on stderr and tolerated; only a
/// malformed MAC is an error to the caller.
pub fn send_magic_packet(
    mac_text: &str,
    broadcast: &str,
    port: u16,
    interface: Option<&str>,
) -> Result<(), WolError> {
    let mac = MacAddress::parse(mac_text)?;
    let packet = MagicPacket::new(&mac);

    let snapshot = enumerate_interfaces();
    let sources = select_sources(&snapshot, interface);

    for outcome in dispatch(&packet, broadcast, port, &sources) {
        match outcome.result {
            Ok(()) => println!(
                "Magic Packet sent to {} via {} ({}) -> {}:{}",
                mac_text, outcome.source.interface, outcome.source.addr, broadcast, port
            ),
            Err(err) => eprintln!(
                "Failed to send from {} ({}): {}",
                outcome.source.addr, outcome.source.interface, err
            ),
        }
    }
    Ok(())
}
