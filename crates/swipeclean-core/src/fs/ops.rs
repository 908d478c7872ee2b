//! Filesystem operations backing the review session's collaborators.

use std::path::Path;
use std::process::Command;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Reads the regular files directly inside `path` as [`FileEntry`] values.
///
/// Directories are skipped, as are names starting with `.` unless
/// `show_hidden` is set. Entries are returned in directory-read order;
/// no sorting is applied. Entries whose metadata cannot be read are
/// silently skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use swipeclean_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user/Downloads"), false).unwrap();
/// for entry in &entries {
///     println!("{} ({} bytes)", entry.name(), entry.size());
/// }
/// ```
pub fn read_directory(path: &Path, show_hidden: bool) -> CoreResult<Vec<FileEntry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match std::fs::metadata(dir_entry.path()) {
            Ok(m) => m,
            Err(_) => continue,
        };
        if !metadata.is_file() {
            continue;
        }
        let entry = FileEntry::new(dir_entry.path(), &metadata);
        if !show_hidden && entry.name().starts_with('.') {
            continue;
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Deletes a single file. Directories are never removed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] if removal is not allowed.
/// - [`CoreError::Io`] for any other failure, including `path` being a directory.
pub fn delete_file(path: &Path) -> CoreResult<()> {
    // symlink_metadata: a symlink is removed itself, never its target
    std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(path, e))?;
    std::fs::remove_file(path).map_err(|e| CoreError::from_io(path, e))
}

/// Shows `path` in the platform's file browser, selecting it where supported.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Launch`] if the browser process cannot be started or exits
///   unsuccessfully.
pub fn reveal_in_file_browser(path: &Path) -> CoreResult<()> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }

    let mut command = reveal_command(path);
    let status = command
        .status()
        .map_err(|e| CoreError::Launch(format!("{:?}: {e}", command.get_program())))?;

    // explorer.exe reports exit code 1 even when it succeeds
    if status.success() || cfg!(target_os = "windows") {
        Ok(())
    } else {
        Err(CoreError::Launch(format!(
            "{:?} exited with {status}",
            command.get_program()
        )))
    }
}

/// Builds the platform-specific command that reveals `path`.
fn reveal_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-R").arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("explorer");
        cmd.arg(format!("/select,{}", path.display()));
        cmd
    } else {
        let parent = path.parent().unwrap_or(path);
        let mut cmd = Command::new("xdg-open");
        cmd.arg(parent);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_directory_lists_files_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), "png").unwrap();
        fs::write(tmp.path().join("b.txt"), "text").unwrap();
        fs::create_dir(tmp.path().join("folder")).unwrap();

        let entries = read_directory(tmp.path(), false).unwrap();
        let mut names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        names.sort();

        assert_eq!(names, vec!["a.png", "b.txt"]);
    }

    #[test]
    fn read_directory_classifies_images() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), "png").unwrap();
        fs::write(tmp.path().join("b.txt"), "text").unwrap();

        let entries = read_directory(tmp.path(), false).unwrap();
        for entry in &entries {
            assert_eq!(entry.is_image(), entry.name() == "a.png");
        }
    }

    #[test]
    fn read_directory_hides_dotfiles_by_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".DS_Store"), "x").unwrap();
        fs::write(tmp.path().join("visible.txt"), "x").unwrap();

        let hidden_off = read_directory(tmp.path(), false).unwrap();
        assert_eq!(hidden_off.len(), 1);
        assert_eq!(hidden_off[0].name(), "visible.txt");

        let hidden_on = read_directory(tmp.path(), true).unwrap();
        assert_eq!(hidden_on.len(), 2);
    }

    #[test]
    fn read_directory_empty() {
        let tmp = TempDir::new().unwrap();
        let entries = read_directory(tmp.path(), false).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn read_directory_missing_path() {
        let tmp = TempDir::new().unwrap();
        let result = read_directory(&tmp.path().join("nope"), false);
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn read_directory_on_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let result = read_directory(&file, false);
        assert!(matches!(result, Err(CoreError::NotADirectory(_))));
    }

    #[test]
    fn read_directory_reports_sizes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("five.bin"), [0u8; 5]).unwrap();
        let entries = read_directory(tmp.path(), false).unwrap();
        assert_eq!(entries[0].size(), 5);
    }

    #[test]
    fn delete_file_removes_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gone.txt");
        fs::write(&file, "bye").unwrap();

        delete_file(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn delete_file_missing_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = delete_file(&tmp.path().join("missing.txt"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn delete_file_refuses_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("keepme");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner.txt"), "x").unwrap();

        assert!(delete_file(&dir).is_err());
        assert!(dir.join("inner.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn delete_file_symlink_keeps_target() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("target.txt");
        fs::write(&target, "data").unwrap();
        let link = tmp.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        delete_file(&link).unwrap();
        assert!(!link.exists());
        assert!(target.exists());
    }

    #[test]
    fn reveal_missing_path_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = reveal_in_file_browser(&tmp.path().join("missing.png"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reveal_command_opens_parent_on_linux() {
        let cmd = reveal_command(Path::new("/home/u/Downloads/a.png"));
        assert_eq!(cmd.get_program(), "xdg-open");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("/home/u/Downloads")]);
    }
}
