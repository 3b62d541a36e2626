use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use crate::errors::TransportError;
use crate::models::{MessageDatagram, MAX_DATAGRAM_LEN};

/// Seam between the form ingestor and the wire. The production transport is
/// an unacknowledged UDP send; swapping in an acknowledged queue only means
/// implementing this trait.
pub trait MessageTransport: Send + Sync {
    fn send(&self, datagram: &MessageDatagram) -> Result<(), TransportError>;
}

/// Fire-and-forget UDP client. One connected socket for the process
/// lifetime, one `send` per message, no receipt.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    pub fn connect(relay_addr: SocketAddr) -> std::io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))?;
        socket.connect(relay_addr)?;
        Ok(Self { socket })
    }
}

impl MessageTransport for UdpTransport {
    fn send(&self, datagram: &MessageDatagram) -> Result<(), TransportError> {
        let payload = serde_json::to_vec(datagram)?;
        if payload.len() > MAX_DATAGRAM_LEN {
            return Err(TransportError::Oversize(payload.len()));
        }
        self.socket.send(&payload)?;
        Ok(())
    }
}
