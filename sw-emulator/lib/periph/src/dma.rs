/*++

Licensed under the Apache-2.0 license.

File Name:

    dma.rs

Abstract:

    File contains the memory fetched by the SHA engine's DMA master.

    The emulator never dereferences host pointers. Message chunks are copied
    into emulator-owned windows when the driver translates them to a DMA
    address, and tasks fetch from those windows only.

--*/

use std::collections::VecDeque;

/// Bus address of the first window
const DMA_BASE: u64 = 0x4000_0000;

/// Windows start on this granule
const WINDOW_ALIGN: u64 = 0x1000;

/// Windows kept mapped before the oldest is recycled
const MAX_WINDOWS: usize = 16;

struct DmaWindow {
    base: u64,
    data: Vec<u8>,
}

/// Emulator-owned memory behind the DMA address space
pub struct DmaMemory {
    next: u64,
    windows: VecDeque<DmaWindow>,
}

impl Default for DmaMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaMemory {
    pub fn new() -> Self {
        Self {
            next: DMA_BASE,
            windows: VecDeque::new(),
        }
    }

    /// Copy `data` into a fresh window and return its bus address.
    pub fn map(&mut self, data: &[u8]) -> u64 {
        if self.windows.len() == MAX_WINDOWS {
            self.windows.pop_front();
        }
        let base = self.next;
        let span = (data.len() as u64).max(1).div_ceil(WINDOW_ALIGN) * WINDOW_ALIGN;
        self.next = match base.checked_add(span) {
            Some(next) => next,
            None => DMA_BASE,
        };
        self.windows.push_back(DmaWindow {
            base,
            data: data.to_vec(),
        });
        base
    }

    /// Fetch `size` bytes at `addr`, which must lie inside one window.
    pub fn fetch(&self, addr: u64, size: usize) -> Option<&[u8]> {
        let window = self
            .windows
            .iter()
            .rev()
            .find(|w| addr >= w.base && addr - w.base < w.data.len().max(1) as u64)?;
        let start = (addr - window.base) as usize;
        window.data.get(start..start.checked_add(size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_inside_window() {
        let mut dma = DmaMemory::new();
        let a = dma.map(b"hello world");
        let b = dma.map(&[7u8; 5000]);
        assert_eq!(a % WINDOW_ALIGN, 0);
        assert!(b >= a + WINDOW_ALIGN);
        assert_eq!(dma.fetch(a, 5), Some(&b"hello"[..]));
        assert_eq!(dma.fetch(a + 6, 5), Some(&b"world"[..]));
        assert_eq!(dma.fetch(b + 4096, 904), Some(&[7u8; 904][..]));
    }

    #[test]
    fn test_fetch_outside_window() {
        let mut dma = DmaMemory::new();
        let a = dma.map(&[1u8; 64]);
        assert_eq!(dma.fetch(0x10, 64), None);
        assert_eq!(dma.fetch(a, 65), None);
        assert_eq!(dma.fetch(a + 64, 1), None);
        assert_eq!(dma.fetch(u64::MAX, usize::MAX), None);
    }

    #[test]
    fn test_oldest_window_recycled() {
        let mut dma = DmaMemory::new();
        let first = dma.map(&[1u8; 16]);
        for _ in 0..MAX_WINDOWS {
            dma.map(&[2u8; 16]);
        }
        assert_eq!(dma.fetch(first, 16), None);
    }
}
