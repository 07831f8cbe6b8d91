//! ICMP echo over a layer 4 raw socket.
//!
//! Each probe opens its own transport channel, sends one echo request with a random
//! identifier and waits for the matching reply. Opening the channel needs raw-socket
//! privileges; when that fails the error is reported as
//! [`ProbeError::TransportUnavailable`] and remembered, so later probes skip straight
//! to the caller's fallback.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{self, IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{self, TransportChannelType, TransportProtocol};

use sweepr_common::{debug, error::ProbeError, probe::EchoProbe, warn};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const ECHO_HEADER_LEN: usize = 8;
const ECHO_PAYLOAD: &[u8] = b"sweepr-echo";
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

pub struct IcmpEcho {
    unavailable: AtomicBool,
}

impl IcmpEcho {
    /// Starts out unavailable when the process lacks root privileges.
    pub fn new() -> Self {
        let privileged = is_root::is_root();
        if !privileged {
            warn!("Raw sockets need root privileges, liveness checks will use the ping utility");
        }
        Self {
            unavailable: AtomicBool::new(!privileged),
        }
    }
}

impl Default for IcmpEcho {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EchoProbe for IcmpEcho {
    async fn echo(&self, address: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(ProbeError::TransportUnavailable(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "ICMP raw socket previously unavailable",
            )));
        }

        let result = tokio::task::spawn_blocking(move || echo_blocking(address, timeout))
            .await
            .map_err(|e| ProbeError::Io(io::Error::other(e)))?;

        if let Err(ProbeError::TransportUnavailable(e)) = &result
            && !self.unavailable.swap(true, Ordering::Relaxed)
        {
            warn!("ICMP echo unavailable ({e}), switching to the ping utility");
        }
        result
    }
}

fn echo_blocking(address: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError> {
    let (mut tx, mut rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)
        .map_err(ProbeError::TransportUnavailable)?;

    let identifier: u16 = rand::random();
    let sequence: u16 = rand::random();
    let mut buffer = [0u8; ECHO_HEADER_LEN + ECHO_PAYLOAD.len()];
    let request = build_echo_request(&mut buffer, identifier, sequence)?;
    tx.send_to(request, IpAddr::V4(address))?;

    let deadline = Instant::now() + timeout;
    let mut replies = transport::icmp_packet_iter(&mut rx);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }
        match replies.next_with_timeout(remaining)? {
            Some((packet, source)) => {
                if source == IpAddr::V4(address) && is_matching_reply(&packet, identifier, sequence) {
                    debug!("echo reply from {address}");
                    return Ok(true);
                }
            }
            None => return Ok(false),
        }
    }
}

fn build_echo_request(
    buffer: &mut [u8],
    identifier: u16,
    sequence: u16,
) -> Result<MutableEchoRequestPacket<'_>, ProbeError> {
    let mut request = MutableEchoRequestPacket::new(buffer)
        .ok_or_else(|| ProbeError::Io(io::Error::other("echo request buffer too small")))?;

    request.set_icmp_type(IcmpTypes::EchoRequest);
    request.set_icmp_code(IcmpCode(0));
    request.set_identifier(identifier);
    request.set_sequence_number(sequence);
    request.set_payload(ECHO_PAYLOAD);

    let checksum: u16 = IcmpPacket::new(request.packet())
        .map(|packet| icmp::checksum(&packet))
        .unwrap_or_default();
    request.set_checksum(checksum);

    Ok(request)
}

fn is_matching_reply(packet: &IcmpPacket, identifier: u16, sequence: u16) -> bool {
    if packet.get_icmp_type() != IcmpTypes::EchoReply {
        return false;
    }
    EchoReplyPacket::new(packet.packet()).is_some_and(|reply| {
        reply.get_identifier() == identifier && reply.get_sequence_number() == sequence
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
