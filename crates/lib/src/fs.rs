use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use tracing::warn;

pub const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

pub fn path_has_extensions(path: &Path, extensions: &[&str]) -> bool {
    path.extension().is_some_and(|ext| {
        extensions
            .iter()
            .any(|wanted| ext.eq_ignore_ascii_case(wanted))
    })
}

/// Lists the regular files directly inside `dir` whose extension is one of
/// `extensions`, sorted by path so that enumeration order is stable. Entries
/// that can't be read, or whose names aren't UTF-8, are skipped.
pub fn filepaths_with_extensions(
    dir: &Path,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = dir
        .read_dir_utf8()?
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry in {dir}: {err}");
                    return None;
                }
            };
            let path = entry.path().to_path_buf();
            if path.is_file() && path_has_extensions(&path, extensions) {
                Some(path)
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod test {
    use camino::{Utf8Path, Utf8PathBuf};
    use pretty_assertions::assert_eq;

    use super::{filepaths_with_extensions, path_has_extensions, HTML_EXTENSIONS};

    #[test]
    fn extension_match_ignores_case() {
        assert!(path_has_extensions(
            Utf8Path::new("/posts/a.HTML"),
            HTML_EXTENSIONS
        ));
        assert!(path_has_extensions(
            Utf8Path::new("/posts/b.htm"),
            HTML_EXTENSIONS
        ));
        assert!(!path_has_extensions(
            Utf8Path::new("/posts/c.md"),
            HTML_EXTENSIONS
        ));
        assert!(!path_has_extensions(
            Utf8Path::new("/posts/html"),
            HTML_EXTENSIONS
        ));
    }

    #[test]
    fn lists_only_matching_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        for name in ["b.html", "a.htm", "notes.txt"] {
            std::fs::write(root.join(name), "").unwrap();
        }
        std::fs::create_dir(root.join("nested.html")).unwrap();

        let paths = filepaths_with_extensions(&root, HTML_EXTENSIONS).unwrap();
        let names = paths
            .iter()
            .map(|p| p.file_name().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(vec!["a.htm", "b.html"], names);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_skipped() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("a.html"), "").unwrap();
        std::fs::write(
            dir.path().join(std::ffi::OsStr::from_bytes(b"\xff\xfe.txt")),
            "",
        )
        .unwrap();

        let paths = filepaths_with_extensions(&root, HTML_EXTENSIONS).unwrap();
        assert_eq!(vec![root.join("a.html")], paths);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert!(filepaths_with_extensions(&root.join("absent"), HTML_EXTENSIONS).is_err());
    }
}
