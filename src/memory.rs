use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Byte-addressed target that encoded programs are written into.
pub trait Bus {
    fn read_u8(&mut self, addr: u32) -> Result<u8>;
    fn read_u16(&mut self, addr: u32) -> Result<u16>;
    fn read_u32(&mut self, addr: u32) -> Result<u32>;
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<()>;

    /// Fail if `len` bytes from `addr` are not all writable. Buses that cannot
    /// tell ahead of time accept everything and report errors per write.
    fn check(&self, _addr: u32, _len: usize) -> Result<()> {
        Ok(())
    }
}

/// Flat little-endian memory mapped at `base`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<u8>,
    pub base: u32,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size],
            base: 0,
        }
    }

    pub fn with_base(size: usize, base: u32) -> Self {
        Self {
            mem: vec![0; size],
            base,
        }
    }
}

impl LinearMemory {
    fn offset(&self, addr: u32, len: usize) -> Result<usize> {
        let off = addr.wrapping_sub(self.base) as usize;
        ensure!(
            addr >= self.base && off.checked_add(len).is_some_and(|end| end <= self.mem.len()),
            "address {addr:#010x} (+{len}) outside memory at {:#010x}..{:#010x}",
            self.base,
            u64::from(self.base) + self.mem.len() as u64
        );
        Ok(off)
    }
    fn load<const N: usize>(&self, addr: u32) -> Result<[u8; N]> {
        let off = self.offset(addr, N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.mem[off..off + N]);
        Ok(buf)
    }
}

impl Bus for LinearMemory {
    fn read_u8(&mut self, addr: u32) -> Result<u8> {
        Ok(self.load::<1>(addr)?[0])
    }
    fn read_u16(&mut self, addr: u32) -> Result<u16> {
        Ok(u16::from_le_bytes(self.load(addr)?))
    }
    fn read_u32(&mut self, addr: u32) -> Result<u32> {
        Ok(u32::from_le_bytes(self.load(addr)?))
    }
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<()> {
        let off = self.offset(addr, 1)?;
        self.mem[off] = val;
        Ok(())
    }
    fn check(&self, addr: u32, len: usize) -> Result<()> {
        self.offset(addr, len).map(|_| ())
    }
}
