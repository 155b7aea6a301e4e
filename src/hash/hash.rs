use std::{
    collections::VecDeque,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

use crate::{config::config::Config, errors::errors::Error};

/// Streams every input file into `sink`.
///
/// Relative paths name exports of other targets and are skipped, as is the
/// build output directory. Directories are expanded in name order.
pub fn hash_files<W, P>(sink: &mut W, files: &[P], config: &Config) -> Result<(), Error>
where
    W: Write,
    P: AsRef<Path>,
{
    walk(sink, files, None, config)
}

/// Like `hash_files`, but only files with extension `ext` (with or without
/// the leading dot) are written. While expanding directories, entries with
/// no extension are still descended into.
pub fn hash_files_with_ext<W, P>(
    sink: &mut W,
    files: &[P],
    ext: &str,
    config: &Config,
) -> Result<(), Error>
where
    W: Write,
    P: AsRef<Path>,
{
    walk(sink, files, Some(ext.trim_start_matches('.')), config)
}

/// Writes `strs` back to back into `sink`. Write failures are reported as
/// `Io` errors against the `<strings>` pseudo-path.
pub fn hash_strings<W, S>(sink: &mut W, strs: &[S]) -> Result<(), Error>
where
    W: Write,
    S: AsRef<str>,
{
    for s in strs {
        sink.write_all(s.as_ref().as_bytes())
            .map_err(|e| Error::io("<strings>", e))?;
    }

    Ok(())
}

/// SHA-256 of the `hash_files` stream, as lowercase hex.
pub fn fingerprint<P: AsRef<Path>>(
    files: &[P],
    ext: Option<&str>,
    config: &Config,
) -> Result<String, Error> {
    let mut hasher = Sha256::new();
    match ext {
        Some(ext) => hash_files_with_ext(&mut hasher, files, ext, config)?,
        None => hash_files(&mut hasher, files, config)?,
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn walk<W, P>(sink: &mut W, files: &[P], ext: Option<&str>, config: &Config) -> Result<(), Error>
where
    W: Write,
    P: AsRef<Path>,
{
    let build_out = config.build_out();
    let mut queue: VecDeque<PathBuf> = files.iter().map(|f| f.as_ref().to_path_buf()).collect();

    while let Some(path) = queue.pop_front() {
        if !path.is_absolute() || path == build_out {
            continue;
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::io(&path, e))?;
        if metadata.is_dir() {
            let mut entries = fs::read_dir(&path)
                .and_then(|dir| dir.map(|entry| entry.map(|e| e.path())).collect::<io::Result<Vec<_>>>())
                .map_err(|e| Error::io(&path, e))?;
            entries.sort();

            queue.extend(entries.into_iter().filter(|entry| match ext {
                Some(ext) => entry.extension().is_none() || has_ext(entry, ext),
                None => true,
            }));
            continue;
        }

        if let Some(ext) = ext {
            if !has_ext(&path, ext) {
                continue;
            }
        }

        write_record(sink, &path, config).map_err(|e| Error::io(&path, e))?;
    }

    Ok(())
}

fn write_record<W: Write>(sink: &mut W, path: &Path, config: &Config) -> io::Result<()> {
    let shown = config.rel_path(path).unwrap_or_else(|| path.to_path_buf());
    tracing::trace!(path = %shown.display(), "hashing");

    writeln!(sink, "file {}", shown.display())?;
    let mut file = File::open(path)?;
    let n = io::copy(&mut file, sink)?;
    writeln!(sink, "{} bytes", n)?;

    Ok(())
}
