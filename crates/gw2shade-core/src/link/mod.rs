//! MumbleLink shared-region access.
//!
//! The game publishes its state through a named file mapping
//! (`MumbleLink` by default) with the fixed layout in [`layout`].
//! We only ever read it; the region has no cross-process lock, so a
//! snapshot may occasionally be torn. Every poll is independently
//! authoritative, so a torn read self-corrects on the next interval.

pub mod decode;
pub mod layout;

#[cfg(test)]
pub mod mock;

pub use decode::{Gw2Context, LinkedMem, decode_context, decode_linked_mem};

use crate::error::Result;

/// Default name of the game's shared mapping.
pub const DEFAULT_LINK_NAME: &str = "MumbleLink";

/// A source of raw link snapshots. Implemented by the Windows file
/// mapping and, in tests, by a scripted mock.
pub trait LinkSource {
    /// Copy the full mapped region into process-local memory.
    ///
    /// Never blocks and makes no atomicity guarantee with respect to
    /// the writer's updates.
    fn read_snapshot(&mut self) -> Result<Vec<u8>>;
}

/// Handle to the named shared-memory mapping.
///
/// Creates the mapping if the game has not started yet, or attaches to
/// the existing one. The view is released on drop on every exit path.
#[cfg(target_os = "windows")]
pub struct MumbleLink {
    mapping: windows::Win32::Foundation::HANDLE,
    view: windows::Win32::System::Memory::MEMORY_MAPPED_VIEW_ADDRESS,
}

#[cfg(target_os = "windows")]
impl MumbleLink {
    /// Open (create-or-attach) the named mapping, sized to exactly fit
    /// the link layout.
    pub fn open(name: &str) -> Result<Self> {
        use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, INVALID_HANDLE_VALUE};
        use windows::Win32::System::Memory::{
            CreateFileMappingW, FILE_MAP_READ, MapViewOfFile, PAGE_READWRITE,
        };
        use windows::core::HSTRING;

        use crate::error::Error;

        let wide_name = HSTRING::from(name);

        // SAFETY: INVALID_HANDLE_VALUE backs the mapping with the
        // pagefile; the size matches the fixed link layout.
        let mapping = unsafe {
            CreateFileMappingW(
                INVALID_HANDLE_VALUE,
                None,
                PAGE_READWRITE,
                0,
                layout::linked::SIZE as u32,
                &wide_name,
            )
        }
        .map_err(|e| {
            if e.code() == ERROR_ACCESS_DENIED.to_hresult() {
                Error::AccessDenied(name.to_string())
            } else {
                Error::RegionOpenFailed {
                    name: name.to_string(),
                    message: e.message(),
                }
            }
        })?;

        // SAFETY: mapping is a valid file-mapping handle; a zero length
        // maps the whole object.
        let view = unsafe { MapViewOfFile(mapping, FILE_MAP_READ, 0, 0, 0) };
        if view.Value.is_null() {
            let err = windows::core::Error::from_win32();
            // SAFETY: mapping was just created and is not shared yet.
            unsafe {
                let _ = windows::Win32::Foundation::CloseHandle(mapping);
            }
            return Err(Error::RegionOpenFailed {
                name: name.to_string(),
                message: err.message(),
            });
        }

        Ok(Self { mapping, view })
    }
}

#[cfg(target_os = "windows")]
impl LinkSource for MumbleLink {
    fn read_snapshot(&mut self) -> Result<Vec<u8>> {
        // SAFETY: the view spans exactly linked::SIZE bytes for the
        // lifetime of self. The writer may race this copy; torn reads
        // are tolerated by the poll loop.
        let bytes = unsafe {
            std::slice::from_raw_parts(self.view.Value as *const u8, layout::linked::SIZE)
        };
        Ok(bytes.to_vec())
    }
}

#[cfg(target_os = "windows")]
impl Drop for MumbleLink {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Memory::UnmapViewOfFile;

        // SAFETY: view and mapping were acquired in open() and are
        // released exactly once.
        unsafe {
            let _ = UnmapViewOfFile(self.view);
            let _ = CloseHandle(self.mapping);
        }
    }
}

/// Stub so the crate builds and the pure modules test off-Windows.
#[cfg(not(target_os = "windows"))]
pub struct MumbleLink;

#[cfg(not(target_os = "windows"))]
impl MumbleLink {
    pub fn open(_name: &str) -> Result<Self> {
        Err(crate::error::Error::Unsupported)
    }
}

#[cfg(not(target_os = "windows"))]
impl LinkSource for MumbleLink {
    fn read_snapshot(&mut self) -> Result<Vec<u8>> {
        Err(crate::error::Error::Unsupported)
    }
}
