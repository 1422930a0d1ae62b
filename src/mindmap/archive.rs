//! Zip archive codec for the dotMind container format.
//!
//! Two operations:
//! - `unpack_archive` — extract every entry into a destination directory,
//!   refusing entry names that resolve outside it (ZIP-slip)
//! - `pack_archive` — build a new archive from `(source path, entry name)`
//!   pairs with DEFLATE compression

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::{ConvertError, ConvertResult};

// ─── Unpack ─────────────────────────────────────────────────────────

/// Extract all entries of `archive_path` into `dest_dir`.
///
/// Every entry name is validated before anything is written for it; the
/// first entry that escapes `dest_dir` aborts the whole extraction with
/// `ConvertError::PathTraversal`. Files written for earlier entries are
/// not rolled back, so callers extract into a scoped temp directory.
///
/// Returns the resolved paths written, in archive iteration order.
pub fn unpack_archive(archive_path: &Path, dest_dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    let file = File::open(archive_path)
        .map_err(|e| ConvertError::Archive(format!("cannot open {}: {}", archive_path.display(), e)))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| ConvertError::Archive(e.to_string()))?;

    let mut written = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ConvertError::Archive(e.to_string()))?;

        // Validate before any filesystem write for this entry.
        let target = resolve_entry_path(dest_dir, entry.name())?;

        // Extraction failures count as archive-entry I/O, not plain
        // file I/O: they happen while materializing the container.
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                ConvertError::Archive(format!("cannot create {}: {}", target.display(), e))
            })?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConvertError::Archive(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
            let mut out = File::create(&target).map_err(|e| {
                ConvertError::Archive(format!("cannot create {}: {}", target.display(), e))
            })?;
            io::copy(&mut entry, &mut out).map_err(|e| {
                ConvertError::Archive(format!("cannot write {}: {}", target.display(), e))
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode)).map_err(
                        |e| {
                            ConvertError::Archive(format!(
                                "cannot set mode on {}: {}",
                                target.display(),
                                e
                            ))
                        },
                    )?;
                }
            }
        }

        written.push(target);
    }

    Ok(written)
}

/// Resolve an entry's stored name against `dest_dir`, lexically.
///
/// Only plain path segments are accepted; `..`, absolute names, and
/// drive prefixes all fail with `PathTraversal` — no file may land
/// outside the destination regardless of how the name is spelled.
fn resolve_entry_path(dest_dir: &Path, entry_name: &str) -> ConvertResult<PathBuf> {
    let mut resolved = dest_dir.to_path_buf();
    let mut segments = 0usize;

    for component in Path::new(entry_name).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                segments += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ConvertError::PathTraversal(entry_name.to_string()));
            }
        }
    }

    if segments == 0 {
        return Err(ConvertError::Archive(format!("empty entry name {:?}", entry_name)));
    }

    Ok(resolved)
}

// ─── Pack ───────────────────────────────────────────────────────────

/// Create a new archive at `archive_path` from `(source, entry name)` pairs.
///
/// The stored entry name is the explicit second element of each pair,
/// never derived from the source path. Entries are compressed with
/// DEFLATE and carry the source file's unix mode bits. The first failed
/// entry aborts; a partially written archive is left on disk.
pub fn pack_archive(archive_path: &Path, entries: &[(&Path, &str)]) -> ConvertResult<()> {
    let file = File::create(archive_path)
        .map_err(|e| ConvertError::Archive(format!("cannot create {}: {}", archive_path.display(), e)))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    for &(source, entry_name) in entries {
        let mut input = File::open(source)?;

        #[allow(unused_mut)]
        let mut options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = input.metadata()?;
            options = options.unix_permissions(metadata.permissions().mode());
        }

        writer
            .start_file(entry_name, options)
            .map_err(|e| ConvertError::Archive(e.to_string()))?;
        io::copy(&mut input, &mut writer)
            .map_err(|e| ConvertError::Archive(format!("cannot write entry {}: {}", entry_name, e)))?;
    }

    let mut inner = writer
        .finish()
        .map_err(|e| ConvertError::Archive(e.to_string()))?;
    inner
        .flush()
        .map_err(|e| ConvertError::Archive(e.to_string()))?;

    Ok(())
}
