use nfc1::{Context, Device, Modulation, target_info::TargetInfo};
use tracing::{info, trace};

use crate::bridge::TargetSource;

// At most 10 targets per poll cycle, 10 connection strings in listing mode.
const MAX_TARGETS: usize = 10;
const MAX_DEVICES: usize = 10;

static MODULATION: Modulation = Modulation {
    modulation_type: nfc1::ModulationType::Iso14443a,
    baud_rate: nfc1::BaudRate::Baud106,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unable to initialize libnfc context")]
    Context(#[source] nfc1::Error),
    #[error("unable to open NFC device")]
    Open(#[source] nfc1::Error),
    #[error("unable to open NFC device {connstring}")]
    OpenConnstring {
        connstring: String,
        source: nfc1::Error,
    },
    #[error("unable to configure initiator mode")]
    InitiatorInit(#[source] nfc1::Error),
}

pub fn init_context() -> Result<Context, SessionError> {
    Context::new().map_err(SessionError::Context)
}

/// An open reader configured as initiator, held for the process lifetime.
pub struct ReaderSession<'a> {
    device: Device<'a>,
}

impl<'a> ReaderSession<'a> {
    pub fn open(
        context: &'a mut Context,
        connstring: Option<&str>,
    ) -> Result<ReaderSession<'a>, SessionError> {
        let mut device = match connstring {
            Some(connstring) => context.open_with_connstring(connstring).map_err(|source| {
                SessionError::OpenConnstring {
                    connstring: connstring.to_string(),
                    source,
                }
            })?,
            None => context.open().map_err(SessionError::Open)?,
        };
        device.initiator_init().map_err(SessionError::InitiatorInit)?;
        info!(name = %device.name(), "opened nfc device");

        Ok(Self { device })
    }
}

impl TargetSource for ReaderSession<'_> {
    type Error = nfc1::Error;

    fn list_targets(&mut self) -> Result<Vec<Vec<u8>>, nfc1::Error> {
        let targets = self
            .device
            .initiator_list_passive_targets(&MODULATION, MAX_TARGETS)?;

        Ok(targets
            .into_iter()
            .filter_map(|target| match target.target_info {
                TargetInfo::Iso14443a(info) => Some(info.uid[..info.uid_len].to_vec()),
                _ => {
                    trace!("ignoring non-iso14443a target");
                    None
                }
            })
            .collect())
    }
}

pub fn list_devices(context: &mut Context) -> Result<Vec<String>, nfc1::Error> {
    context.list_devices(MAX_DEVICES)
}
