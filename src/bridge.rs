use std::time::Duration;

use tracing::{error, trace};

use crate::wire;

pub const POLL_INTERVAL: Duration = Duration::from_millis(125);

/// One blocking query for currently-present tags, UIDs in driver order.
pub trait TargetSource {
    type Error: std::fmt::Display;

    fn list_targets(&mut self) -> Result<Vec<Vec<u8>>, Self::Error>;
}

pub trait DatagramSink {
    fn forward(&mut self, payload: &[u8]);
}

/// Polls `source` at a fixed cadence, forwarding one datagram per detected
/// tag. A poll error ends the loop; it is the only way out.
pub fn run<S, D>(source: &mut S, sink: &mut D, interval: Duration)
where
    S: TargetSource,
    D: DatagramSink,
{
    loop {
        match source.list_targets() {
            Ok(uids) => {
                if uids.is_empty() {
                    trace!("no tag found");
                }

                for uid in uids {
                    let message = wire::wire_message(&uid);
                    trace!("forwarding {message}");
                    sink.forward(message.as_bytes());
                }
            }
            Err(err) => {
                error!("error polling nfc reader: {err}");
                break;
            }
        }

        std::thread::sleep(interval);
    }
}
