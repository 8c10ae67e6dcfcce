use std::fs;
use std::path::Path;
use std::process::Command;

use stowin_error::{Result, StowError};

/// The build procedure detected in a source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystem {
    Autotools,
    CMake,
    Make,
    /// No build system: the tree is taken as a pre-built install image.
    Copy,
}

#[must_use]
pub fn detect(source_dir: &Path) -> BuildSystem {
    if source_dir.join("configure").is_file() {
        BuildSystem::Autotools
    } else if source_dir.join("CMakeLists.txt").is_file() {
        BuildSystem::CMake
    } else if source_dir.join("Makefile").is_file() || source_dir.join("makefile").is_file() {
        BuildSystem::Make
    } else {
        BuildSystem::Copy
    }
}

/// Build the source tree and install it under `prefix` (the package's
/// staging directory). Build failures surface the step name and its captured
/// output verbatim.
pub fn build(source_dir: &Path, prefix: &Path, debug: bool) -> Result<()> {
    let system = detect(source_dir);
    stowin_logger::debug(&format!("Build system: {system:?}"), debug);

    match system {
        BuildSystem::Autotools => {
            run_step(source_dir, "configure", Command::new("sh").arg("./configure").arg(format!("--prefix={}", prefix.display())), debug)?;
            run_step(source_dir, "make", &mut Command::new("make"), debug)?;
            run_step(source_dir, "make install", Command::new("make").arg("install"), debug)
        }
        BuildSystem::CMake => {
            let build_dir = source_dir.join("build-stowin");
            run_step(
                source_dir,
                "cmake configure",
                Command::new("cmake")
                    .arg("-S")
                    .arg(source_dir)
                    .arg("-B")
                    .arg(&build_dir)
                    .arg(format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display())),
                debug,
            )?;
            run_step(source_dir, "cmake build", Command::new("cmake").arg("--build").arg(&build_dir), debug)?;
            run_step(source_dir, "cmake install", Command::new("cmake").arg("--install").arg(&build_dir), debug)
        }
        BuildSystem::Make => {
            run_step(source_dir, "make", &mut Command::new("make"), debug)?;
            run_step(
                source_dir,
                "make install",
                Command::new("make").arg("install").arg(format!("PREFIX={}", prefix.display())),
                debug,
            )
        }
        BuildSystem::Copy => copy_tree(source_dir, prefix),
    }
}

fn run_step(cwd: &Path, step: &str, command: &mut Command, debug: bool) -> Result<()> {
    stowin_logger::status(&format!("Running {step}..."));

    let output = command
        .current_dir(cwd)
        .output()
        .map_err(|e| StowError::BuildFailed(step.to_string(), e.to_string()))?;

    if debug {
        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            stowin_logger::debug(line, debug);
        }
    }

    if output.status.success() {
        Ok(())
    } else {
        let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
        if captured.trim().is_empty() {
            captured = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        Err(StowError::BuildFailed(step.to_string(), captured))
    }
}

/// Pre-built trees are copied into the staging prefix as-is.
fn copy_tree(source_dir: &Path, prefix: &Path) -> Result<()> {
    fs::create_dir_all(prefix)?;
    fs_extra::dir::copy(
        source_dir,
        prefix,
        &fs_extra::dir::CopyOptions::new().overwrite(true).content_only(true),
    )
    .map_err(|e| StowError::BuildFailed("copy".to_string(), e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_build_systems() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(detect(tmp.path()), BuildSystem::Copy);

        fs::write(tmp.path().join("Makefile"), "all:\n").unwrap();
        assert_eq!(detect(tmp.path()), BuildSystem::Make);

        fs::write(tmp.path().join("CMakeLists.txt"), "").unwrap();
        assert_eq!(detect(tmp.path()), BuildSystem::CMake);

        fs::write(tmp.path().join("configure"), "#!/bin/sh\n").unwrap();
        assert_eq!(detect(tmp.path()), BuildSystem::Autotools);
    }

    #[test]
    fn copy_fallback_installs_prebuilt_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("dummy-1.0");
        fs::create_dir_all(src.join("bin")).unwrap();
        fs::write(src.join("bin/dummy"), "#!/bin/sh\necho dummy\n").unwrap();

        let staging = tmp.path().join("staging");
        build(&src, &staging, false).unwrap();

        assert!(staging.join("bin/dummy").is_file());
    }

    #[test]
    fn make_install_populates_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("tool-1.0");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("Makefile"),
            "all:\n\t@true\n\ninstall:\n\tmkdir -p $(PREFIX)/bin\n\techo tool > $(PREFIX)/bin/tool\n",
        )
        .unwrap();

        let staging = tmp.path().join("staging");
        fs::create_dir_all(&staging).unwrap();
        build(&src, &staging, false).unwrap();

        assert!(staging.join("bin/tool").is_file());
    }

    #[test]
    fn failing_build_surfaces_output() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("broken-1.0");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Makefile"), "all:\n\t@echo broken >&2; false\n").unwrap();

        let staging = tmp.path().join("staging");
        match build(&src, &staging, false) {
            Err(StowError::BuildFailed(step, output)) => {
                assert_eq!(step, "make");
                assert!(output.contains("broken"));
            }
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }
}
