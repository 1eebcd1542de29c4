use serde::{Deserialize, Serialize};
use strata_wire::{CodecError, Marshal, Reader, Writer};

use crate::{PacketPayload, ids};

/// Tick synchronisation between client and server.
///
/// Only registered for protocols before 534; the canonical model has no
/// counterpart and drops it on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickSync {
    pub client_request_timestamp: i64,
    pub server_reception_timestamp: i64,
}

impl PacketPayload for TickSync {
    const ID: u32 = ids::TICK_SYNC;
    const NAME: &'static str = "TickSync";
}

impl Marshal for TickSync {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.i64(self.client_request_timestamp);
        w.i64(self.server_reception_timestamp);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            client_request_timestamp: r.i64()?,
            server_reception_timestamp: r.i64()?,
        })
    }
}
