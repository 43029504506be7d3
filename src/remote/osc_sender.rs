use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use crate::error::{Error, Result};
use crate::message::{Destination, Message};

/// Fire-and-forget outbound channel for OSC messages.
pub trait Transport {
    /// Encode and transmit one message. Returns the datagram size in bytes.
    fn send(&mut self, message: &Message) -> Result<usize>;
}

/// OSC sender over an unconnected UDP socket aimed at a single destination.
pub struct OscSender {
    socket: UdpSocket,
    target_addr: SocketAddr,
}

impl OscSender {
    pub fn new(destination: &Destination) -> Result<Self> {
        let target_addr = resolve(destination)?;

        // Ephemeral local port in the same address family as the target
        let local: SocketAddr = if target_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).map_err(Error::Bind)?;

        // Left unconnected: ICMP port-unreachable from a missing listener
        // must not surface as an error on a later send.
        match socket.local_addr() {
            Ok(local_addr) => {
                log::info!("OSC sender local {} -> target {}", local_addr, target_addr)
            }
            Err(_) => log::info!("OSC sender sending to {}", target_addr),
        }

        Ok(OscSender { socket, target_addr })
    }

    pub fn target_addr(&self) -> SocketAddr {
        self.target_addr
    }
}

fn resolve(destination: &Destination) -> Result<SocketAddr> {
    let resolve_err = |source| Error::Resolve { target: destination.to_string(), source };
    (destination.host.as_str(), destination.port)
        .to_socket_addrs()
        .map_err(resolve_err)?
        .next()
        .ok_or_else(|| resolve_err(io::Error::new(io::ErrorKind::NotFound, "no addresses found")))
}

impl Transport for OscSender {
    fn send(&mut self, message: &Message) -> Result<usize> {
        let msg_buf = message.encode()?;
        let bytes_sent = self
            .socket
            .send_to(&msg_buf, self.target_addr)
            .map_err(|source| Error::Send { target: self.target_addr.to_string(), source })?;
        log::debug!(
            "[OSC] Sent {} bytes to {}: {}",
            bytes_sent,
            self.target_addr,
            message.address
        );
        Ok(bytes_sent)
    }
}
