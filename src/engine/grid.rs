//! Emulated accelerator-resident grid buffers
//!
//! A [`DeviceGrid`] stands in for a device allocation: 64-byte-aligned
//! zeroed memory addressed through a raw pointer, touched only through
//! explicit bulk upload/download calls, never aliased by host slices the
//! orchestrator holds. The bundled engines emulate device residency on
//! the host; an engine wrapping a real accelerator would keep the same
//! contract and move bytes across the bus instead.

use crate::error::{Error, Result};
use bytemuck::Pod;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// Alignment of grid allocations, matching device allocator granularity
const GRID_ALIGN: usize = 64;

/// One accelerator-resident buffer, sized at allocation and freed on drop
#[derive(Debug)]
pub struct DeviceGrid {
    ptr: NonNull<u8>,
    size_bytes: usize,
}

impl DeviceGrid {
    /// Allocate a zeroed grid of `numel` elements of `elem_bytes` each
    pub fn allocate(numel: usize, elem_bytes: usize) -> Result<Self> {
        let size_bytes = numel
            .checked_mul(elem_bytes)
            .ok_or(Error::OutOfMemory { size: usize::MAX })?;
        if size_bytes == 0 {
            return Err(Error::Internal("zero-size grid allocation".to_string()));
        }

        let layout = Layout::from_size_align(size_bytes, GRID_ALIGN)
            .map_err(|e| Error::Internal(format!("bad grid layout: {e}")))?;

        let raw = unsafe { alloc_zeroed(layout) };
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self { ptr, size_bytes }),
            None => Err(Error::OutOfMemory { size: size_bytes }),
        }
    }

    /// Size of the allocation in bytes
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Bulk host-to-device transfer; `src` must match the grid exactly
    pub fn upload(&mut self, src: &[u8]) -> Result<()> {
        if src.len() != self.size_bytes {
            return Err(Error::GridSizeMismatch {
                grid_bytes: self.size_bytes,
                host_bytes: src.len(),
            });
        }
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), self.ptr.as_ptr(), src.len());
        }
        Ok(())
    }

    /// Bulk device-to-host transfer; `dst` must match the grid exactly
    pub fn download(&self, dst: &mut [u8]) -> Result<()> {
        if dst.len() != self.size_bytes {
            return Err(Error::GridSizeMismatch {
                grid_bytes: self.size_bytes,
                host_bytes: dst.len(),
            });
        }
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.as_ptr(), dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    /// View the grid as typed elements, for engine-internal kernels
    ///
    /// The allocation is 64-byte aligned, which satisfies every `Pod`
    /// element the harness uses; a trailing partial element is not
    /// exposed.
    pub fn as_slice<T: Pod>(&self) -> &[T] {
        let count = self.size_bytes / std::mem::size_of::<T>();
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr() as *const T, count) }
    }
}

impl Drop for DeviceGrid {
    fn drop(&mut self) {
        // Layout was validated at allocation time.
        if let Ok(layout) = Layout::from_size_align(self.size_bytes, GRID_ALIGN) {
            unsafe {
                dealloc(self.ptr.as_ptr(), layout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_zeroed() {
        let grid = DeviceGrid::allocate(16, 4).unwrap();
        let view: &[u32] = grid.as_slice();
        assert_eq!(view, &[0u32; 16]);
    }

    #[test]
    fn upload_then_download_roundtrips() {
        let mut grid = DeviceGrid::allocate(4, 8).unwrap();
        let host: Vec<f64> = vec![1.5, -2.5, 3.25, 0.0];
        grid.upload(bytemuck::cast_slice(&host)).unwrap();

        let mut back = vec![0.0f64; 4];
        grid.download(bytemuck::cast_slice_mut(&mut back)).unwrap();
        assert_eq!(back, host);
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let mut grid = DeviceGrid::allocate(8, 4).unwrap();
        let short = [0u8; 16];
        assert!(matches!(
            grid.upload(&short),
            Err(Error::GridSizeMismatch { .. })
        ));
    }

    #[test]
    fn zero_size_allocation_is_an_error() {
        assert!(DeviceGrid::allocate(0, 8).is_err());
    }
}
