//! RAII wrapper for native-owned blobs

use crate::{Error, Result};
use shaderconductor::{Api, ShaderConductorBlob};
use std::ops::Deref;
use std::slice;

/// Strips trailing zero bytes, which the engine sometimes includes in
/// text blobs.
pub(crate) fn trim_trailing_nuls(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| &bytes[..=i])
        .unwrap_or(&[])
}

/// Owned handle to a native byte buffer.
///
/// Provides safe access to the blob's contents and destroys the handle
/// exactly once when dropped.
pub struct Blob {
    api: &'static Api,
    ptr: *mut ShaderConductorBlob,
}

impl Blob {
    /// Copies `data` into a newly allocated native blob.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let api = Api::get()?;
        let ptr =
            unsafe { api.CreateShaderConductorBlob(data.as_ptr().cast(), data.len() as i32) };
        if ptr.is_null() {
            return Err(Error::CreateBlob);
        }
        Ok(Blob { api, ptr })
    }

    /// Returns the blob contents as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            let data = self.api.GetShaderConductorBlobData(self.ptr);
            let size = self.api.GetShaderConductorBlobSize(self.ptr);
            if data.is_null() || size <= 0 {
                return &[];
            }
            slice::from_raw_parts(data.cast::<u8>(), size as usize)
        }
    }

    /// Returns the size of the blob in bytes.
    pub fn len(&self) -> usize {
        unsafe { self.api.GetShaderConductorBlobSize(self.ptr).max(0) as usize }
    }

    /// Returns true if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interprets the blob as a UTF-8 string, trimming trailing nulls.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(trim_trailing_nuls(self.as_bytes())).map_err(Into::into)
    }

    /// Converts the blob to a String, replacing invalid UTF-8.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(trim_trailing_nuls(self.as_bytes())).into_owned()
    }
}

impl Drop for Blob {
    fn drop(&mut self) {
        unsafe {
            self.api.DestroyShaderConductorBlob(self.ptr);
        }
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob")
            .field("len", &self.len())
            .field("ptr", &self.ptr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_nuls() {
        assert_eq!(trim_trailing_nuls(b"abc\0\0"), b"abc");
        assert_eq!(trim_trailing_nuls(b"abc"), b"abc");
        assert_eq!(trim_trailing_nuls(b"\0\0"), b"");
        assert_eq!(trim_trailing_nuls(b""), b"");
        assert_eq!(trim_trailing_nuls(b"a\0b\0"), b"a\0b");
    }

    #[test]
    fn test_blob_round_trip() {
        if crate::ensure_loaded().is_err() {
            eprintln!("skipping: native wrapper library not available");
            return;
        }

        let blob = Blob::from_bytes(b"hello blob").unwrap();
        assert_eq!(blob.len(), 10);
        assert!(!blob.is_empty());
        assert_eq!(blob.as_bytes(), b"hello blob");
        assert_eq!(blob.as_str().unwrap(), "hello blob");
    }
}
