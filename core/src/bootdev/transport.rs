//! Disk services that carry out a [`DiskAddressPacket`]

use super::dap::DiskAddressPacket;
use alloc::vec::Vec;

/// Success status
pub const STATUS_OK: u8 = 0x00;
/// Invalid function or parameter
pub const STATUS_BAD_COMMAND: u8 = 0x01;
/// Medium is write-protected
pub const STATUS_WRITE_PROTECTED: u8 = 0x03;
/// Requested sector does not exist
pub const STATUS_SECTOR_NOT_FOUND: u8 = 0x04;

/// Legacy extended disk service
///
/// Both calls are synchronous and return the BIOS status byte, `0x00` on
/// success. The packet's buffer fields are owned by the service; callers
/// pass the data through `buffer`.
pub trait DiskService {
    /// INT 13h function 0x42
    fn extended_read(&mut self, drive: u8, packet: &DiskAddressPacket, buffer: &mut [u8]) -> u8;

    /// INT 13h function 0x43
    fn extended_write(&mut self, drive: u8, packet: &DiskAddressPacket, buffer: &[u8]) -> u8;
}

/// Disk image held in memory, for simulation and host tools
#[derive(Debug, Clone)]
pub struct MemoryDisk {
    image: Vec<u8>,
    sector_size: usize,
    read_only: bool,
    reads: usize,
}

impl MemoryDisk {
    /// Wrap `image`, addressed in `sector_size` byte sectors
    pub fn new(image: Vec<u8>, sector_size: usize) -> Self {
        Self {
            image,
            sector_size,
            read_only: false,
            reads: 0,
        }
    }

    /// Reject every write with the write-protected status
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Number of read requests served
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Raw image bytes
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Whole sectors in the image
    pub fn sector_count(&self) -> u64 {
        (self.image.len() / self.sector_size) as u64
    }

    fn span(&self, packet: &DiskAddressPacket) -> Result<core::ops::Range<usize>, u8> {
        if packet.sector_count == 0 {
            return Err(STATUS_BAD_COMMAND);
        }
        let len = packet.sector_count as usize * self.sector_size;
        let start = usize::try_from(packet.lba)
            .ok()
            .and_then(|lba| lba.checked_mul(self.sector_size))
            .ok_or(STATUS_SECTOR_NOT_FOUND)?;
        match start.checked_add(len) {
            Some(end) if end <= self.image.len() => Ok(start..end),
            _ => Err(STATUS_SECTOR_NOT_FOUND),
        }
    }
}

impl DiskService for MemoryDisk {
    fn extended_read(&mut self, _drive: u8, packet: &DiskAddressPacket, buffer: &mut [u8]) -> u8 {
        self.reads += 1;
        let span = match self.span(packet) {
            Ok(span) => span,
            Err(status) => return status,
        };
        let n = buffer.len().min(span.len());
        buffer[..n].copy_from_slice(&self.image[span.start..span.start + n]);
        STATUS_OK
    }

    fn extended_write(&mut self, _drive: u8, packet: &DiskAddressPacket, buffer: &[u8]) -> u8 {
        if self.read_only {
            return STATUS_WRITE_PROTECTED;
        }
        let span = match self.span(packet) {
            Ok(span) => span,
            Err(status) => return status,
        };
        let n = buffer.len().min(span.len());
        self.image[span.start..span.start + n].copy_from_slice(&buffer[..n]);
        STATUS_OK
    }
}

#[cfg(all(target_arch = "x86", target_os = "none"))]
pub use bios::BiosDisk;

#[cfg(all(target_arch = "x86", target_os = "none"))]
mod bios {
    use super::{DiskService, STATUS_BAD_COMMAND};
    use crate::bootdev::dap::{DiskAddressPacket, DAP_SIZE};

    /// Largest sector the bounce buffer holds
    const BOUNCE_SIZE: usize = 2048;

    /// INT 13h through the real BIOS
    ///
    /// The BIOS can only address memory below 1 MiB, so every transfer goes
    /// through a bounce buffer in low memory; the packet itself lives just
    /// before it. The call blocks the whole kernel until the BIOS returns
    /// and has no timeout.
    pub struct BiosDisk {
        low_mem: usize,
    }

    impl BiosDisk {
        /// Use `DAP_SIZE + 2048` bytes at linear address `low_mem`
        ///
        /// # Safety
        ///
        /// The region must lie below 1 MiB, be identity mapped and not be used
        /// by anything else, and BIOS interrupts must be serviceable from the
        /// current CPU mode.
        pub const unsafe fn new(low_mem: usize) -> Self {
            Self { low_mem }
        }

        fn bounce(&self) -> *mut u8 {
            (self.low_mem + DAP_SIZE) as *mut u8
        }

        fn call(&mut self, function: u8, drive: u8, packet: &DiskAddressPacket) -> u8 {
            let mut packet = *packet;
            if packet.set_buffer(self.bounce() as u32).is_err() {
                return STATUS_BAD_COMMAND;
            }
            let bytes = packet.to_bytes();
            let dap = self.low_mem as *mut u8;
            let ax: u16;

            // SAFETY: `new` guarantees the packet and bounce regions are ours
            // and reachable by the BIOS. ESI is reserved by the compiler, so it
            // is saved and restored around the call.
            unsafe {
                core::ptr::copy_nonoverlapping(bytes.as_ptr(), dap, DAP_SIZE);
                core::arch::asm!(
                    "push esi",
                    "mov esi, {dap}",
                    "int 0x13",
                    "pop esi",
                    dap = in(reg) dap,
                    inout("ax") (function as u16) << 8 => ax,
                    in("dl") drive,
                );
            }
            (ax >> 8) as u8
        }
    }

    impl DiskService for BiosDisk {
        fn extended_read(&mut self, drive: u8, packet: &DiskAddressPacket, buffer: &mut [u8]) -> u8 {
            let status = self.call(0x42, drive, packet);
            if status == 0 {
                let n = buffer.len().min(BOUNCE_SIZE);
                // SAFETY: the BIOS filled the bounce buffer, which is BOUNCE_SIZE long
                unsafe { core::ptr::copy_nonoverlapping(self.bounce(), buffer.as_mut_ptr(), n) };
            }
            status
        }

        fn extended_write(&mut self, drive: u8, packet: &DiskAddressPacket, buffer: &[u8]) -> u8 {
            let n = buffer.len().min(BOUNCE_SIZE);
            // SAFETY: the bounce buffer is BOUNCE_SIZE long and owned by this driver
            unsafe { core::ptr::copy_nonoverlapping(buffer.as_ptr(), self.bounce(), n) };
            self.call(0x43, drive, packet)
        }
    }
}
