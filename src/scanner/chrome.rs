use crate::error::{ScanError, ScanOutcome};
use crate::manifest::{name_and_version, read_manifest};
use crate::model::{ExtensionRecord, ManifestFailure, ScanResult};
use crate::platform::chrome_extensions_dir;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Length of the generated IDs Chrome uses as extension folder names.
pub const EXTENSION_ID_LEN: usize = 32;

/// Options that change how the extensions directory is traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Visit folders and manifests in file name order instead of listing order.
    pub sorted: bool,
}

pub struct ChromeScanner {
    extensions_dir: PathBuf,
    options: ScanOptions,
}

impl ChromeScanner {
    /// Creates a scanner for the current user's default Chrome profile.
    pub fn new(options: ScanOptions) -> ScanOutcome<Self> {
        Ok(Self::with_dir(chrome_extensions_dir()?, options))
    }

    /// Creates a scanner for an arbitrary extensions directory.
    pub fn with_dir(extensions_dir: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            extensions_dir: extensions_dir.into(),
            options,
        }
    }
}

#[async_trait]
impl super::Scanner for ChromeScanner {
    fn name(&self) -> &'static str {
        "Chrome Extensions"
    }

    fn extensions_dir(&self) -> &Path {
        &self.extensions_dir
    }

    async fn scan(&self) -> ScanOutcome<ScanResult> {
        scan_extensions(&self.extensions_dir, self.options)
    }
}

/// Returns true if `name` looks like a Chrome extension ID.
pub fn is_extension_id(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| n.chars().count() == EXTENSION_ID_LEN)
}

/// Lists the directories directly under `extensions_dir` whose name is an
/// extension ID.
///
/// # Errors
///
/// Fails if `extensions_dir` cannot be listed.
pub fn candidate_folders(
    extensions_dir: &Path,
    options: ScanOptions,
) -> ScanOutcome<Vec<PathBuf>> {
    let read_dir_error = |source| ScanError::ReadDir {
        path: extensions_dir.to_path_buf(),
        source,
    };

    let mut folders = Vec::new();
    for entry in fs::read_dir(extensions_dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }
        if !is_extension_id(&entry.file_name()) {
            debug!(
                path = %path.display(),
                "skipping folder without an extension ID name"
            );
            continue;
        }

        folders.push(path);
    }

    if options.sorted {
        folders.sort();
    }

    Ok(folders)
}

/// Lists the `.json` files inside the version subfolders of one extension
/// folder.
///
/// Only files exactly one directory below `extension_folder` are returned.
/// Every `.json` file found is returned, not just `manifest.json`.
pub fn manifest_paths(
    extension_folder: &Path,
    options: ScanOptions,
) -> ScanOutcome<Vec<PathBuf>> {
    let mut walker = WalkDir::new(extension_folder)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true);
    if options.sorted {
        walker = walker.sort_by_file_name();
    }

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Entries next to the version folders that cannot be resolved are not folders.
            Err(err) if err.depth() == 1 && !err.path().is_some_and(Path::is_dir) => {
                debug!(error = %err, "skipping unreadable entry in extension folder");
                continue;
            }
            // Broken links inside a version folder surface when the manifest is read.
            Err(err) if err.depth() == 2 => {
                if let Some(path) = err.path().filter(|p| has_json_extension(p)) {
                    paths.push(path.to_path_buf());
                }
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if entry.file_type().is_dir() || !has_json_extension(entry.path()) {
            continue;
        }

        paths.push(entry.into_path());
    }

    Ok(paths)
}

fn has_json_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.as_encoded_bytes().ends_with(b".json"))
}

/// Scans an extensions directory and collects one record per manifest that
/// declares both a name and a version.
///
/// Manifests that cannot be read or parsed are recorded in
/// [`ScanResult::failures`] and the scan moves on.
///
/// # Errors
///
/// Fails if `extensions_dir` or one of the extension folders cannot be listed.
pub fn scan_extensions(
    extensions_dir: &Path,
    options: ScanOptions,
) -> ScanOutcome<ScanResult> {
    let folders = candidate_folders(extensions_dir, options)?;
    debug!(count = folders.len(), "found extension folders");

    let mut extensions = Vec::new();
    let mut failures = Vec::new();

    for folder in &folders {
        for manifest_path in manifest_paths(folder, options)? {
            let doc = match read_manifest(&manifest_path) {
                Ok(doc) => doc,
                Err(err) => {
                    debug!(
                        path = %manifest_path.display(),
                        error = %err,
                        "failed to load manifest"
                    );
                    failures.push(ManifestFailure::new(manifest_path, err));
                    continue;
                }
            };

            match name_and_version(&doc) {
                Some((name, version)) => {
                    extensions.push(ExtensionRecord::new(name, version, manifest_path));
                }
                None => {
                    debug!(
                        path = %manifest_path.display(),
                        "manifest lacks name or version"
                    );
                }
            }
        }
    }

    info!(
        extensions = extensions.len(),
        failures = failures.len(),
        "scan finished"
    );

    Ok(ScanResult::new(extensions_dir, extensions, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use tempfile::TempDir;

    fn ext_id(c: char) -> String {
        std::iter::repeat(c).take(EXTENSION_ID_LEN).collect()
    }

    fn write_manifest(
        base: &Path,
        folder: &str,
        version: &str,
        file: &str,
        content: &[u8],
    ) -> PathBuf {
        let dir = base.join(folder).join(version);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    fn lines(result: &ScanResult) -> Vec<String> {
        result
            .extensions
            .iter()
            .map(|r| format!("Extension: {}, Version: {}", r.name, r.version))
            .collect()
    }

    #[test]
    fn test_is_extension_id() {
        assert!(is_extension_id(OsStr::new(&ext_id('a'))));
        assert!(!is_extension_id(OsStr::new(&"a".repeat(31))));
        assert!(!is_extension_id(OsStr::new(&"a".repeat(33))));
        assert!(!is_extension_id(OsStr::new("")));
        // 32 characters, more than 32 bytes
        assert!(is_extension_id(OsStr::new(&"é".repeat(32))));
    }

    #[test]
    fn test_candidate_folders_filter() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join(ext_id('a'))).unwrap();
        fs::create_dir(base.join("b".repeat(31))).unwrap();
        fs::create_dir(base.join("c".repeat(33))).unwrap();
        fs::create_dir(base.join("Temp")).unwrap();
        fs::write(base.join(ext_id('d')), "not a folder").unwrap();

        let folders = candidate_folders(base, ScanOptions::default()).unwrap();
        assert_eq!(folders, vec![base.join(ext_id('a'))]);
    }

    #[test]
    fn test_candidate_folders_sorted() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        for c in ['q', 'c', 'x', 'a'] {
            fs::create_dir(base.join(ext_id(c))).unwrap();
        }

        let folders = candidate_folders(base, ScanOptions { sorted: true }).unwrap();
        let expected: Vec<PathBuf> = ['a', 'c', 'q', 'x']
            .iter()
            .map(|c| base.join(ext_id(*c)))
            .collect();
        assert_eq!(folders, expected);
    }

    #[test]
    fn test_candidate_folders_missing_base() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Extensions");

        let err = candidate_folders(&missing, ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_manifest_paths_depth() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join(ext_id('a'));

        fs::create_dir_all(folder.join("1.0_0").join("_locales").join("en")).unwrap();
        fs::write(folder.join("1.0_0").join("manifest.json"), "{}").unwrap();
        fs::write(folder.join("1.0_0").join("extra.json"), "{}").unwrap();
        fs::write(folder.join("1.0_0").join("background.js"), "").unwrap();
        fs::write(
            folder
                .join("1.0_0")
                .join("_locales")
                .join("en")
                .join("messages.json"),
            "{}",
        )
        .unwrap();
        fs::write(folder.join("top.json"), "{}").unwrap();
        fs::create_dir_all(folder.join("1.0_0").join("dir.json")).unwrap();

        let paths = manifest_paths(&folder, ScanOptions { sorted: true }).unwrap();
        assert_eq!(
            paths,
            vec![
                folder.join("1.0_0").join("extra.json"),
                folder.join("1.0_0").join("manifest.json"),
            ]
        );
    }

    #[test]
    fn test_manifest_paths_multiple_versions() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join(ext_id('a'));
        for version in ["2.0_0", "1.0_0"] {
            fs::create_dir_all(folder.join(version)).unwrap();
            fs::write(folder.join(version).join("manifest.json"), "{}").unwrap();
        }

        let paths = manifest_paths(&folder, ScanOptions { sorted: true }).unwrap();
        assert_eq!(
            paths,
            vec![
                folder.join("1.0_0").join("manifest.json"),
                folder.join("2.0_0").join("manifest.json"),
            ]
        );
    }

    #[test]
    fn test_scan_single_extension() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            &ext_id('a'),
            "1.2.3_0",
            "manifest.json",
            br#"{"name": "TestExt", "version": "1.2.3"}"#,
        );

        let result = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(lines(&result), vec!["Extension: TestExt, Version: 1.2.3"]);
        assert!(result.failures.is_empty());
        assert_eq!(result.extensions[0].extension_id(), Some(ext_id('a').as_str()));
    }

    #[test]
    fn test_scan_skips_manifest_without_name() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            &ext_id('a'),
            "1.2.3_0",
            "manifest.json",
            br#"{"version": "1.2.3"}"#,
        );

        let result = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert!(result.extensions.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_scan_ignores_wrong_length_folders() {
        let dir = TempDir::new().unwrap();
        let manifest = br#"{"name": "Hidden", "version": "9.9"}"#;
        write_manifest(dir.path(), &"a".repeat(31), "1.0", "manifest.json", manifest);
        write_manifest(dir.path(), &"b".repeat(33), "1.0", "manifest.json", manifest);

        let result = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert!(result.extensions.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_scan_recovers_from_bad_manifests() {
        let dir = TempDir::new().unwrap();
        let bad = write_manifest(
            dir.path(),
            &ext_id('a'),
            "1.0_0",
            "manifest.json",
            b"{\"name\": \"caf\xe9\", \"version\": \"1\"}",
        );
        let broken = write_manifest(
            dir.path(),
            &ext_id('b'),
            "1.0_0",
            "manifest.json",
            b"{\"name\":",
        );
        write_manifest(
            dir.path(),
            &ext_id('c'),
            "1.0_0",
            "manifest.json",
            br#"{"name": "Good", "version": "4.5"}"#,
        );

        let result = scan_extensions(dir.path(), ScanOptions { sorted: true }).unwrap();
        assert_eq!(lines(&result), vec!["Extension: Good, Version: 4.5"]);

        let failed: Vec<&Path> = result.failures.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(failed, vec![bad.as_path(), broken.as_path()]);
        assert!(result.failures.iter().all(|f| !f.error.is_empty()));
    }

    #[test]
    fn test_scan_keeps_every_manifest_in_folder() {
        let dir = TempDir::new().unwrap();
        let id = ext_id('a');
        let old = br#"{"name": "Old", "version": "1.0"}"#;
        let new = br#"{"name": "New", "version": "2.0"}"#;
        write_manifest(dir.path(), &id, "1.0_0", "manifest.json", old);
        write_manifest(dir.path(), &id, "2.0_0", "manifest.json", new);

        let result = scan_extensions(dir.path(), ScanOptions { sorted: true }).unwrap();
        assert_eq!(
            lines(&result),
            vec!["Extension: Old, Version: 1.0", "Extension: New, Version: 2.0"]
        );
    }

    #[test]
    fn test_scan_first_match_wins() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            &ext_id('a'),
            "3.1_0",
            "manifest.json",
            br#"{
                "browser_action": {"default_title": "Click", "name": "Inner"},
                "version": "3.1",
                "name": "Outer",
                "icons": [{"version": "ignored"}]
            }"#,
        );

        let result = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(lines(&result), vec!["Extension: Inner, Version: 3.1"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_dangling_link_beside_version_folder() {
        let dir = TempDir::new().unwrap();
        let id = ext_id('a');
        write_manifest(
            dir.path(),
            &id,
            "1.0_0",
            "manifest.json",
            br#"{"name": "X", "version": "1"}"#,
        );
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join(&id).join("stale"))
            .unwrap();

        let result = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(lines(&result), vec!["Extension: X, Version: 1"]);
        assert!(result.failures.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_reports_dangling_manifest_link() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            &ext_id('a'),
            "1.0_0",
            "manifest.json",
            br#"{"name": "Good", "version": "1.0"}"#,
        );
        let version_dir = dir.path().join(ext_id('b')).join("1.0_0");
        fs::create_dir_all(&version_dir).unwrap();
        let dangling = version_dir.join("manifest.json");
        std::os::unix::fs::symlink(dir.path().join("gone.json"), &dangling).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), version_dir.join("notes.txt"))
            .unwrap();

        let result = scan_extensions(dir.path(), ScanOptions { sorted: true }).unwrap();
        assert_eq!(lines(&result), vec!["Extension: Good, Version: 1.0"]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].path, dangling);
        assert!(!result.failures[0].error.is_empty());
    }

    #[test]
    fn test_scan_missing_base_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = scan_extensions(&dir.path().join("nope"), ScanOptions::default());
        assert!(matches!(result, Err(ScanError::ReadDir { .. })));
    }

    #[test]
    fn test_scan_is_repeatable() {
        let dir = TempDir::new().unwrap();
        for (c, name) in [('a', "One"), ('b', "Two"), ('c', "Three")] {
            let content = format!(r#"{{"name": "{}", "version": "1.0"}}"#, name);
            write_manifest(dir.path(), &ext_id(c), "1.0_0", "manifest.json", content.as_bytes());
        }

        let first = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        let second = scan_extensions(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(first.extensions, second.extensions);
        assert_eq!(first.extensions.len(), 3);
    }

    #[tokio::test]
    async fn test_chrome_scanner_scan() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            &ext_id('a'),
            "1.2.3_0",
            "manifest.json",
            br#"{"name": "TestExt", "version": "1.2.3"}"#,
        );

        let scanner = ChromeScanner::with_dir(dir.path(), ScanOptions::default());
        assert_eq!(scanner.name(), "Chrome Extensions");
        assert_eq!(scanner.extensions_dir(), dir.path());

        let result = scanner.scan().await.unwrap();
        assert_eq!(result.extensions_dir, dir.path());
        assert_eq!(lines(&result), vec!["Extension: TestExt, Version: 1.2.3"]);
    }
}
