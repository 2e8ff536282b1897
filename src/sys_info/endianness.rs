use std::fmt;

use thiserror::Error;

/// Pattern written into a 32-bit word and read back through narrower views.
pub const PROBE_PATTERN: u32 = 0x1122_3344;

// Exactly one byte order must be configured for the build.
const _: () = assert!(cfg!(target_endian = "little") != cfg!(target_endian = "big"));

/// Byte order of multi-byte integers in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// The order the crate was compiled for.
    #[must_use]
    pub const fn configured() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// `PROBE_PATTERN` as seen through two 16-bit windows on this order.
    #[must_use]
    pub const fn expected_halves(self) -> [u16; 2] {
        match self {
            ByteOrder::Little => [0x3344, 0x1122],
            ByteOrder::Big => [0x1122, 0x3344],
        }
    }

    /// `PROBE_PATTERN` as seen through four 8-bit windows on this order.
    #[must_use]
    pub const fn expected_bytes(self) -> [u8; 4] {
        match self {
            ByteOrder::Little => [0x44, 0x33, 0x22, 0x11],
            ByteOrder::Big => [0x11, 0x22, 0x33, 0x44],
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little endian"),
            ByteOrder::Big => f.write_str("big endian"),
        }
    }
}

/// Byte order check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndianError {
    #[error("{order}: wrong 16bit values {:#x} and {:#x}", .found[0], .found[1])]
    WrongHalves { order: ByteOrder, found: [u16; 2] },
    #[error("{order}: wrong 8bit values {found:02x?}")]
    WrongBytes { order: ByteOrder, found: [u8; 4] },
}

/// What the probe word looks like in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeReadout {
    pub halves: [u16; 2],
    pub bytes: [u8; 4],
}

impl ProbeReadout {
    /// The byte order whose layout matches the observed bytes, if any.
    #[must_use]
    pub fn observed_order(&self) -> Option<ByteOrder> {
        [ByteOrder::Little, ByteOrder::Big]
            .into_iter()
            .find(|order| order.expected_bytes() == self.bytes)
    }
}

/// Reinterprets [`PROBE_PATTERN`] in place as `[u16; 2]` and `[u8; 4]`.
#[must_use]
pub fn read_probe() -> ProbeReadout {
    let word = std::hint::black_box(PROBE_PATTERN);
    ProbeReadout {
        halves: bytemuck::cast::<u32, [u16; 2]>(word),
        bytes: bytemuck::cast::<u32, [u8; 4]>(word),
    }
}

/// Checks `readout` against the layout `order` predicts.
///
/// # Errors
/// [`EndianError::WrongHalves`] or [`EndianError::WrongBytes`] on mismatch,
/// 16-bit windows checked first.
pub fn verify(order: ByteOrder, readout: &ProbeReadout) -> Result<(), EndianError> {
    if readout.halves != order.expected_halves() {
        return Err(EndianError::WrongHalves {
            order,
            found: readout.halves,
        });
    }
    if readout.bytes != order.expected_bytes() {
        return Err(EndianError::WrongBytes {
            order,
            found: readout.bytes,
        });
    }
    Ok(())
}

/// Verifies the configured byte order against the runtime probe.
///
/// # Errors
/// See [`verify`].
pub fn probe() -> Result<ByteOrder, EndianError> {
    let order = ByteOrder::configured();
    verify(order, &read_probe())?;
    Ok(order)
}
