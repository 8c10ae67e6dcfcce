use std::fs;
use std::path::{Path, PathBuf};

use stowin_error::{Result, StowError};

/// Where the source bytes come from. Parsed from the `--source` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Directory(PathBuf),
    Archive(PathBuf),
    Url(String),
}

impl SourceSpec {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else if is_tarball(raw) {
            Self::Archive(PathBuf::from(raw))
        } else {
            Self::Directory(PathBuf::from(raw))
        }
    }
}

fn is_tarball(raw: &str) -> bool {
    raw.ends_with(".tar.gz") || raw.ends_with(".tgz")
}

/// Produce a local directory holding the unpacked source tree. Local
/// directories are used in place; archives and URLs are unpacked under
/// `workdir`, which the caller owns (typically a tempdir dropped after the
/// build).
pub fn fetch(spec: &SourceSpec, workdir: &Path) -> Result<PathBuf> {
    match spec {
        SourceSpec::Directory(dir) => {
            if dir.is_dir() {
                Ok(dir.clone())
            } else {
                Err(StowError::SourceUnavailable(
                    dir.display().to_string(),
                    "not a directory".to_string(),
                ))
            }
        }
        SourceSpec::Archive(path) => {
            let bytes = fs::read(path).map_err(|e| {
                StowError::SourceUnavailable(path.display().to_string(), e.to_string())
            })?;
            extract_tarball(&bytes, workdir)
                .map_err(|e| StowError::SourceUnavailable(path.display().to_string(), e.to_string()))
        }
        SourceSpec::Url(url) => {
            stowin_logger::status(&format!("Downloading {url}..."));
            let bytes = download(url)
                .map_err(|e| StowError::SourceUnavailable(url.clone(), e.to_string()))?;
            extract_tarball(&bytes, workdir)
                .map_err(|e| StowError::SourceUnavailable(url.clone(), e.to_string()))
        }
    }
}

fn download(url: &str) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Unpack a gzipped tarball into `workdir/src`. A single top-level directory
/// (the usual `name-version/` layout) is unwrapped so callers always get the
/// tree root.
fn extract_tarball(bytes: &[u8], workdir: &Path) -> anyhow::Result<PathBuf> {
    let dest = workdir.join("src");
    fs::create_dir_all(&dest)?;

    let tar = flate2::read::GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(tar);
    archive.unpack(&dest)?;

    let entries: Vec<_> = fs::read_dir(&dest)?.collect::<std::io::Result<Vec<_>>>()?;
    if entries.len() == 1 && entries.first().is_some_and(|e| e.path().is_dir()) {
        entries
            .first()
            .map(fs::DirEntry::path)
            .ok_or_else(|| anyhow::anyhow!("empty archive"))
    } else {
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_tarball(top_dir: Option<&str>, files: &[(&str, &str)]) -> Vec<u8> {
        let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, content) in files {
            let full = top_dir.map_or_else(|| path.to_string(), |d| format!("{d}/{path}"));
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, full, content.as_bytes())
                .unwrap();
        }
        let encoder = builder.into_inner().unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn parse_distinguishes_spec_kinds() {
        assert_eq!(
            SourceSpec::parse("https://example.org/p-1.0.tar.gz"),
            SourceSpec::Url("https://example.org/p-1.0.tar.gz".to_string())
        );
        assert_eq!(
            SourceSpec::parse("/tmp/p-1.0.tar.gz"),
            SourceSpec::Archive(PathBuf::from("/tmp/p-1.0.tar.gz"))
        );
        assert_eq!(
            SourceSpec::parse("/tmp/p-1.0"),
            SourceSpec::Directory(PathBuf::from("/tmp/p-1.0"))
        );
    }

    #[test]
    fn local_directory_is_used_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("pkg");
        fs::create_dir_all(&src).unwrap();

        let work = tempfile::tempdir().unwrap();
        let out = fetch(&SourceSpec::Directory(src.clone()), work.path()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn missing_directory_is_source_unavailable() {
        let work = tempfile::tempdir().unwrap();
        match fetch(&SourceSpec::Directory(PathBuf::from("/no/such/dir")), work.path()) {
            Err(StowError::SourceUnavailable(_, _)) => {}
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn tarball_with_top_dir_is_unwrapped() {
        let tmp = tempfile::tempdir().unwrap();
        let tarball = tmp.path().join("dummy-1.0.tar.gz");
        let mut file = fs::File::create(&tarball).unwrap();
        file.write_all(&make_tarball(Some("dummy-1.0"), &[("bin/dummy", "#!/bin/sh\n")]))
            .unwrap();

        let work = tempfile::tempdir().unwrap();
        let out = fetch(&SourceSpec::Archive(tarball), work.path()).unwrap();
        assert!(out.ends_with("dummy-1.0"));
        assert!(out.join("bin/dummy").is_file());
    }

    #[test]
    fn flat_tarball_keeps_extraction_root() {
        let tmp = tempfile::tempdir().unwrap();
        let tarball = tmp.path().join("flat.tgz");
        fs::write(
            &tarball,
            make_tarball(None, &[("bin/a", "a"), ("lib/b", "b")]),
        )
        .unwrap();

        let work = tempfile::tempdir().unwrap();
        let out = fetch(&SourceSpec::Archive(tarball), work.path()).unwrap();
        assert!(out.join("bin/a").is_file());
        assert!(out.join("lib/b").is_file());
    }
}
