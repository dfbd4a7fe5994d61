use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use tracing::trace;

use crate::bridge::DatagramSink;

/// Port the till system listens on.
pub const TILL_PORT: u16 = 8455;

/// Renders a UID as the datagram payload: `nfc:` followed by two lowercase
/// hex characters per byte, in the order the driver yielded them.
pub fn wire_message(uid: &[u8]) -> String {
    format!("nfc:{}", hex::encode(uid))
}

pub struct UdpForwarder {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl UdpForwarder {
    pub fn bind() -> io::Result<UdpForwarder> {
        Self::bind_to(SocketAddr::from((Ipv4Addr::LOCALHOST, TILL_PORT)))
    }

    fn bind_to(dest: SocketAddr) -> io::Result<UdpForwarder> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        Ok(UdpForwarder { socket, dest })
    }
}

impl DatagramSink for UdpForwarder {
    fn forward(&mut self, payload: &[u8]) {
        // Fire and forget: a failed send never stops the polling loop.
        if let Err(err) = self.socket.send_to(payload, self.dest) {
            trace!("datagram send failed: {err}");
        }
    }
}
