use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;

use crate::errors::{RelayError, StoreError};
use crate::models::{MessageDatagram, StoredMessage, MAX_DATAGRAM_LEN};
use crate::store::MessageStore;

/// Cap on concurrent per-datagram tasks so a volume spike cannot grow tasks
/// without bound while the store is slow.
const MAX_IN_FLIGHT: usize = 64;

const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// UDP listener half of the message pipeline. Binds once at startup and runs
/// for the process lifetime; each accepted datagram is handled on its own
/// task so a slow store write never blocks the next receipt.
pub struct Relay<S> {
    socket: UdpSocket,
    store: Arc<S>,
    permits: Arc<Semaphore>,
}

impl<S: MessageStore + 'static> Relay<S> {
    pub async fn bind(addr: SocketAddr, store: Arc<S>) -> Result<Self, RelayError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| RelayError::Bind { addr, source })?;
        Ok(Self {
            socket,
            store,
            permits: Arc::new(Semaphore::new(MAX_IN_FLIGHT)),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive loop. Nothing short of the socket disappearing stops it: a
    /// malformed datagram or a failed store write is logged and dropped, and
    /// the loop keeps serving.
    pub async fn run(self) {
        match self.socket.local_addr() {
            Ok(addr) => log::info!("message relay listening on udp://{addr}"),
            Err(e) => log::warn!("message relay listening on unknown address: {e}"),
        }

        // one byte of headroom to tell an oversized datagram from a full one
        let mut buf = [0u8; MAX_DATAGRAM_LEN + 1];
        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    log::warn!("UDP receive failed: {e}");
                    continue;
                }
            };
            if len > MAX_DATAGRAM_LEN {
                log::warn!("dropping oversized datagram (> {MAX_DATAGRAM_LEN} bytes) from {peer}");
                continue;
            }

            let permit = match Arc::clone(&self.permits).acquire_owned().await {
                Ok(permit) => permit,
                // the semaphore is never closed
                Err(_) => return,
            };
            let store = Arc::clone(&self.store);
            let payload = buf[..len].to_vec();
            tokio::spawn(async move {
                handle_datagram(store, &payload, peer).await;
                drop(permit);
            });
        }
    }
}

async fn handle_datagram<S: MessageStore>(store: Arc<S>, payload: &[u8], peer: SocketAddr) {
    let datagram: MessageDatagram = match serde_json::from_slice(payload) {
        Ok(datagram) => datagram,
        Err(e) => {
            log::warn!("dropping malformed datagram from {peer}: {e}");
            return;
        }
    };

    // receipt time from our own clock, not the sender's
    let record = StoredMessage::from_datagram(datagram);
    let username = record.username.clone();
    log::debug!("received message from {username} at {}", Local::now());

    match tokio::time::timeout(STORE_TIMEOUT, store.append(record)).await {
        Ok(Ok(id)) => log::info!("stored message from {username} ({id})"),
        Ok(Err(StoreError::Unavailable)) => {
            log::error!("document store unavailable, dropping message from {username}");
        }
        Ok(Err(e)) => log::error!("dropping message from {username}: {e}"),
        Err(_) => log::error!(
            "store append timed out after {STORE_TIMEOUT:?}, dropping message from {username}"
        ),
    }
}
