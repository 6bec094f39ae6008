//! Path resolution.
//!
//! The extensions directory is always derived from the current user's home
//! directory using the Windows layout of the default Chrome profile:
//!
//! `~/AppData/Local/Google/Chrome/User Data/Default/Extensions`
//!
//! Nothing here checks that the directory exists; the scanner reports that
//! when it tries to list it.

use crate::error::{ScanError, ScanOutcome};
use std::path::{Path, PathBuf};

/// Path components below the home directory.
const EXTENSIONS_SUBPATH: [&str; 7] = [
    "AppData",
    "Local",
    "Google",
    "Chrome",
    "User Data",
    "Default",
    "Extensions",
];

/// Returns the Chrome extensions directory for the current user.
///
/// # Errors
///
/// Returns [`ScanError::HomeDirUnavailable`] if the home directory cannot be
/// determined.
///
/// # Example
///
/// ```no_run
/// use crxlist::platform::chrome_extensions_dir;
///
/// let dir = chrome_extensions_dir()?;
/// println!("{}", dir.display());
/// # Ok::<(), crxlist::ScanError>(())
/// ```
pub fn chrome_extensions_dir() -> ScanOutcome<PathBuf> {
    let home = dirs::home_dir().ok_or(ScanError::HomeDirUnavailable)?;
    Ok(extensions_dir_in(&home))
}

/// Returns the Chrome extensions directory below the given home directory.
pub fn extensions_dir_in(home: &Path) -> PathBuf {
    EXTENSIONS_SUBPATH
        .iter()
        .fold(home.to_path_buf(), |path, part| path.join(part))
}

/// Returns the config directory for crxlist.
///
/// Falls back to the working directory if no config directory can be
/// determined.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crxlist")
}
