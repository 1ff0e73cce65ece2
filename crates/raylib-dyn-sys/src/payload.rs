// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::LoadError;
use flate2::read::GzDecoder;
use std::{ffi::OsString, io, path::Path};

/// Gzip-compressed raylib shared library, empty when the crate was built
/// without a blob.
static EMBEDDED: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/raylib.gz"));

/// Fixed filename of the extracted library for the current platform
/// (`raylib.dll`, `libraylib.so` or `libraylib.dylib`).
pub fn library_filename() -> OsString {
    libloading::library_filename("raylib")
}

/// Outcome of [`Payload::unpack_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unpacked {
    /// A file was already present at the destination and was left untouched
    Existing,
    /// The payload was decompressed, the value is the number of bytes written
    Written(u64),
}

/// A gzip-compressed shared library carried in the binary.
#[derive(Debug, Clone, Copy)]
pub struct Payload {
    bytes: &'static [u8],
}

impl Payload {
    pub const fn new(bytes: &'static [u8]) -> Self {
        Payload { bytes }
    }

    /// The payload compiled into this crate by the build script.
    pub fn embedded() -> Self {
        Payload::new(EMBEDDED)
    }

    /// Compressed size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decompresses the payload to `path` unless a file already exists there.
    ///
    /// The library is written to a temporary file next to `path` and renamed
    /// into place without clobbering, so an interrupted extraction never
    /// leaves a truncated library behind and a concurrent extraction by
    /// another process wins cleanly.
    pub fn unpack_to(&self, path: &Path) -> Result<Unpacked, LoadError> {
        if path.exists() {
            log::debug!("using existing library at {}", path.display());
            return Ok(Unpacked::Existing);
        }

        if self.is_empty() {
            return Err(LoadError::NoEmbeddedLibrary);
        }

        let extract_err = |source: io::Error| LoadError::Extract {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".raylib-")
            .tempfile_in(dir)
            .map_err(extract_err)?;

        let mut decoder = GzDecoder::new(self.bytes);
        let written = io::copy(&mut decoder, tmp.as_file_mut()).map_err(extract_err)?;
        tmp.as_file().sync_all().map_err(extract_err)?;

        #[cfg(unix)]
        {
            use std::{fs::Permissions, os::unix::fs::PermissionsExt};
            tmp.as_file()
                .set_permissions(Permissions::from_mode(0o755))
                .map_err(extract_err)?;
        }

        match tmp.persist_noclobber(path) {
            Ok(_) => {
                log::debug!("extracted {} bytes to {}", written, path.display());
                Ok(Unpacked::Written(written))
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{} appeared during extraction, keeping it", path.display());
                Ok(Unpacked::Existing)
            }
            Err(err) => Err(extract_err(err.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::{fs, io::Write};

    fn gzip(data: &[u8]) -> &'static [u8] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        Box::leak(encoder.finish().unwrap().into_boxed_slice())
    }

    #[test]
    fn test_unpack_writes_decompressed_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());
        let payload = Payload::new(gzip(b"not really an ELF file"));

        let result = payload.unpack_to(&path).unwrap();

        assert_eq!(result, Unpacked::Written(22));
        assert_eq!(fs::read(&path).unwrap(), b"not really an ELF file");
    }

    #[test]
    fn test_unpack_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());
        fs::write(&path, b"previous extraction").unwrap();

        let payload = Payload::new(gzip(b"fresh payload"));
        assert_eq!(payload.unpack_to(&path).unwrap(), Unpacked::Existing);
        assert_eq!(fs::read(&path).unwrap(), b"previous extraction");
    }

    #[test]
    fn test_unpack_existing_file_without_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());
        fs::write(&path, b"installed by hand").unwrap();

        assert_eq!(
            Payload::new(&[]).unpack_to(&path).unwrap(),
            Unpacked::Existing
        );
    }

    #[test]
    fn test_unpack_empty_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());

        let err = Payload::new(&[]).unpack_to(&path).unwrap_err();
        assert!(matches!(err, LoadError::NoEmbeddedLibrary));
        assert!(!path.exists());
    }

    #[test]
    fn test_unpack_corrupt_payload_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());

        let err = Payload::new(b"definitely not gzip")
            .unpack_to(&path)
            .unwrap_err();
        assert!(matches!(err, LoadError::Extract { .. }));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unpack_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(library_filename());

        let err = Payload::new(gzip(b"payload")).unpack_to(&path).unwrap_err();
        match err {
            LoadError::Extract { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_sets_executable_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(library_filename());
        Payload::new(gzip(b"payload")).unpack_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_library_filename() {
        let name = library_filename();
        let name = name.to_string_lossy();
        assert!(name.contains("raylib"));
        #[cfg(windows)]
        assert_eq!(name, "raylib.dll");
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libraylib.so");
    }
}
