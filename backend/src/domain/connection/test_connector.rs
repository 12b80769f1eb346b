//! Scripted connector whose behaviour is keyed on the descriptor host.
//!
//! Hosts containing `bad-open` fail to open, `bad-probe` fail the probe and
//! `hang` never answer the probe. Everything else connects.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{ConnectError, StoreConnector};

use super::Descriptor;

#[derive(Clone, Default)]
pub(crate) struct ScriptedConnector {
    opened: Arc<Mutex<Vec<String>>>,
    closed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConnector {
    pub(crate) fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn closed(&self) -> Vec<String> {
        self.closed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl StoreConnector for ScriptedConnector {
    type Handle = String;

    async fn open(&self, descriptor: &Descriptor) -> Result<Self::Handle, ConnectError> {
        let raw = descriptor.expose().to_owned();
        if raw.contains("bad-open") {
            return Err(ConnectError::open("invalid descriptor"));
        }
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw.clone());
        Ok(raw)
    }

    async fn probe(&self, handle: &Self::Handle) -> Result<(), ConnectError> {
        if handle.contains("hang") {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
        }
        if handle.contains("bad-probe") {
            return Err(ConnectError::probe("connection refused"));
        }
        Ok(())
    }

    async fn close(&self, handle: Self::Handle) {
        self.closed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}
