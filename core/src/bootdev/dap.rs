//! Disk Address Packet for the INT 13h extended read/write services

use super::BootDevError;

/// Encoded packet length
pub const DAP_SIZE: usize = 16;

/// Highest linear address a segment:offset pair can reach
const REAL_MODE_LIMIT: u32 = 0xF_FFFF;

/// Request block for INT 13h functions 0x42 (read) and 0x43 (write)
///
/// Layout on the wire:
///
/// | offset | field          | size |
/// |--------|----------------|------|
/// | 0      | packet size    | 1    |
/// | 1      | reserved       | 1    |
/// | 2      | sector count   | 2    |
/// | 4      | buffer offset  | 2    |
/// | 6      | buffer segment | 2    |
/// | 8      | starting LBA   | 8    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskAddressPacket {
    /// Always 0x10
    pub packet_size: u8,
    /// Sectors to transfer
    pub sector_count: u16,
    /// Offset half of the transfer buffer's real-mode address
    pub buffer_offset: u16,
    /// Segment half of the transfer buffer's real-mode address
    pub buffer_segment: u16,
    /// Absolute starting sector
    pub lba: u64,
}

impl DiskAddressPacket {
    /// Single-sector request for `lba`
    pub const fn read_one(lba: u64) -> Self {
        Self {
            packet_size: DAP_SIZE as u8,
            sector_count: 1,
            buffer_offset: 0,
            buffer_segment: 0,
            lba,
        }
    }

    /// Point the transfer at a linear address below 1 MiB
    pub fn set_buffer(&mut self, linear: u32) -> Result<(), BootDevError> {
        if linear > REAL_MODE_LIMIT {
            return Err(BootDevError::Invalid);
        }
        self.buffer_segment = (linear >> 4) as u16;
        self.buffer_offset = (linear & 0xF) as u16;
        Ok(())
    }

    /// Linear address of the transfer buffer
    pub const fn buffer_linear(&self) -> u32 {
        ((self.buffer_segment as u32) << 4) + self.buffer_offset as u32
    }

    /// Little-endian encoding handed to the BIOS
    pub fn to_bytes(&self) -> [u8; DAP_SIZE] {
        let mut out = [0u8; DAP_SIZE];
        out[0] = self.packet_size;
        out[2..4].copy_from_slice(&self.sector_count.to_le_bytes());
        out[4..6].copy_from_slice(&self.buffer_offset.to_le_bytes());
        out[6..8].copy_from_slice(&self.buffer_segment.to_le_bytes());
        out[8..16].copy_from_slice(&self.lba.to_le_bytes());
        out
    }
}
