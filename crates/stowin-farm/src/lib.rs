pub mod farm;
pub mod fold;
pub mod ignore;
pub mod resolve;
pub mod unfold;

pub use farm::SymlinkFarm;
pub use fold::FoldReport;
pub use ignore::IgnoreList;
pub use resolve::Resolved;
pub use unfold::UnfoldReport;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    use stowin_error::StowError;

    fn farm(prefix: &Path) -> SymlinkFarm {
        SymlinkFarm::new(prefix, IgnoreList::defaults().unwrap())
    }

    /// Lay a package tree under `<prefix>/stow/<name>`.
    fn make_package(prefix: &Path, name: &str, files: &[&str]) {
        let root = prefix.join("stow").join(name);
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("{name}:{file}")).unwrap();
        }
    }

    /// Flatten a tree into `(relative path, kind)` pairs for exact
    /// before/after comparisons. Symlinks record their literal target.
    fn snapshot(root: &Path) -> Vec<(PathBuf, String)> {
        fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) {
            let mut entries: Vec<_> = fs::read_dir(dir).unwrap().map(Result::unwrap).collect();
            entries.sort_by_key(fs::DirEntry::file_name);
            for entry in entries {
                let path = entry.path();
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                let meta = fs::symlink_metadata(&path).unwrap();
                if meta.file_type().is_symlink() {
                    let target = fs::read_link(&path).unwrap();
                    out.push((rel, format!("link:{}", target.display())));
                } else if meta.is_dir() {
                    out.push((rel.clone(), "dir".to_string()));
                    walk(root, &path, out);
                } else {
                    out.push((rel, "file".to_string()));
                }
            }
        }
        let mut out = Vec::new();
        walk(root, root, &mut out);
        out
    }

    #[test]
    fn single_file_folds_to_one_link_in_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        make_package(&prefix, "dummy-1.0", &["bin/dummy"]);

        let report = farm(&prefix).fold("dummy-1.0").unwrap();

        assert_eq!(report.placed, 1);
        let link = prefix.join("bin").join("dummy");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_link(&link).unwrap(),
            PathBuf::from("../stow/dummy-1.0/bin/dummy")
        );
        assert_eq!(
            fs::canonicalize(&link).unwrap(),
            prefix.join("stow/dummy-1.0/bin/dummy")
        );
    }

    #[test]
    fn missing_directory_becomes_whole_subtree_link() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        make_package(&prefix, "lib-2.3", &["lib/liblib.so", "lib/pkgconfig/lib.pc"]);

        let report = farm(&prefix).fold("lib-2.3").unwrap();

        // One link covers the whole lib subtree.
        assert_eq!(report.placed, 1);
        let link = prefix.join("lib");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(prefix.join("lib/pkgconfig/lib.pc").is_file());
    }

    #[test]
    fn refold_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        make_package(&prefix, "dummy-1.0", &["bin/dummy"]);

        let f = farm(&prefix);
        f.fold("dummy-1.0").unwrap();
        let again = f.fold("dummy-1.0").unwrap();

        assert_eq!(again.placed, 0);
        assert_eq!(again.kept, 1);
    }

    #[test]
    fn foreign_file_blocks_fold_and_stays_intact() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        fs::write(prefix.join("bin/dummy"), "user file").unwrap();
        make_package(&prefix, "dummy-1.0", &["bin/dummy"]);

        match farm(&prefix).fold("dummy-1.0") {
            Err(StowError::ConflictWithForeignFile(_)) => {}
            other => panic!("expected ConflictWithForeignFile, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(prefix.join("bin/dummy")).unwrap(), "user file");
    }

    #[test]
    fn second_package_with_same_file_conflicts() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        make_package(&prefix, "a-1.0", &["bin/tool"]);
        make_package(&prefix, "b-1.0", &["bin/tool"]);

        let f = farm(&prefix);
        f.fold("a-1.0").unwrap();
        match f.fold("b-1.0") {
            Err(StowError::ConflictWithForeignFile(_)) => {}
            other => panic!("expected ConflictWithForeignFile, got {other:?}"),
        }
        // a's link is untouched.
        assert_eq!(
            fs::canonicalize(prefix.join("bin/tool")).unwrap(),
            prefix.join("stow/a-1.0/bin/tool")
        );
    }

    #[test]
    fn shared_directory_is_unfolded_one_level() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("share")).unwrap();
        make_package(&prefix, "a-1.0", &["share/man/man1/a.1"]);
        make_package(&prefix, "b-1.0", &["share/man/man1/b.1"]);

        let f = farm(&prefix);
        f.fold("a-1.0").unwrap();
        // a owns share/man as a single subtree link.
        assert!(
            fs::symlink_metadata(prefix.join("share/man"))
                .unwrap()
                .file_type()
                .is_symlink()
        );

        f.fold("b-1.0").unwrap();

        // The shared path is now a real directory with one link per file.
        assert!(prefix.join("share/man/man1").is_dir());
        assert!(!fs::symlink_metadata(prefix.join("share/man/man1")).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::canonicalize(prefix.join("share/man/man1/a.1")).unwrap(),
            prefix.join("stow/a-1.0/share/man/man1/a.1")
        );
        assert_eq!(
            fs::canonicalize(prefix.join("share/man/man1/b.1")).unwrap(),
            prefix.join("stow/b-1.0/share/man/man1/b.1")
        );
    }

    #[test]
    fn unfold_restores_pre_fold_state() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        fs::create_dir_all(prefix.join("share/man")).unwrap();
        make_package(
            &prefix,
            "dummy-1.0",
            &["bin/dummy", "share/man/man1/dummy.1", "share/applications/dummy.desktop"],
        );

        let before = snapshot(&prefix);
        let f = farm(&prefix);
        f.fold("dummy-1.0").unwrap();
        let report = f.unfold("dummy-1.0").unwrap();

        assert!(report.removed > 0);
        assert_eq!(snapshot(&prefix), before);
    }

    #[test]
    fn unfold_keeps_preexisting_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        // share/doc existed before the package and is not part of the
        // standard layout, so only the readme link may come and go.
        fs::create_dir_all(prefix.join("share/doc")).unwrap();
        make_package(&prefix, "dummy-1.0", &["share/doc/readme"]);

        let before = snapshot(&prefix);
        let f = farm(&prefix);
        f.fold("dummy-1.0").unwrap();
        f.unfold("dummy-1.0").unwrap();

        assert!(prefix.join("share/doc").is_dir());
        assert_eq!(snapshot(&prefix), before);
    }

    #[test]
    fn unfold_refolds_remaining_owner() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("share/man")).unwrap();
        make_package(&prefix, "a-1.0", &["share/man/man1/a.1"]);
        make_package(&prefix, "b-1.0", &["share/man/man1/b.1"]);

        let f = farm(&prefix);
        f.fold("a-1.0").unwrap();
        f.fold("b-1.0").unwrap();
        let report = f.unfold("b-1.0").unwrap();

        // man1 held links of a alone afterwards, so it collapses back into
        // a single subtree link.
        assert!(report.collapsed >= 1);
        assert!(
            fs::symlink_metadata(prefix.join("share/man/man1"))
                .unwrap()
                .file_type()
                .is_symlink()
        );
        assert_eq!(
            fs::canonicalize(prefix.join("share/man/man1/a.1")).unwrap(),
            prefix.join("stow/a-1.0/share/man/man1/a.1")
        );
        assert!(!prefix.join("share/man/man1/b.1").exists());
    }

    #[test]
    fn ignored_entries_are_never_linked() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("share/info")).unwrap();
        make_package(&prefix, "doc-1.0", &["share/info/dir", "share/info/doc.info"]);

        let report = farm(&prefix).fold("doc-1.0").unwrap();

        assert_eq!(report.skipped, 1);
        assert!(!prefix.join("share/info/dir").exists());
        assert!(prefix.join("share/info/doc.info").is_file());
    }

    #[test]
    fn dangling_link_is_a_warning_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        std::os::unix::fs::symlink("../nowhere", prefix.join("bin/dummy")).unwrap();
        make_package(&prefix, "dummy-1.0", &["bin/dummy"]);

        let report = farm(&prefix).fold("dummy-1.0").unwrap();

        assert_eq!(report.placed, 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(report.warnings.first(), Some(StowError::DanglingLink(_))));
    }

    #[test]
    fn fold_unknown_package_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().canonicalize().unwrap();

        match farm(&prefix).fold("ghost-0.1") {
            Err(StowError::UnknownPackage(_)) => {}
            other => panic!("expected UnknownPackage, got {other:?}"),
        }
    }
}
