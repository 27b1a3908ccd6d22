use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Replaces `path` with `content` in one step: the data goes to a temporary
/// sibling first and is renamed over the target, so a failed write never
/// leaves a truncated file behind.
pub fn atomic_write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if path.is_dir() {
        return Err(std::io::Error::other(format!(
            "{} is a directory",
            path.display()
        )));
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => return Err(std::io::Error::other("path has no parent")),
    };
    let tmp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("desktop"),
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    let tmp_path = parent.join(tmp_name);

    let result = write_and_rename(path, &tmp_path, content);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }
    sync_parent_dir(parent)?;
    Ok(())
}

fn write_and_rename(path: &Path, tmp_path: &Path, content: &[u8]) -> std::io::Result<()> {
    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(tmp_path)?;
        file.write_all(content)?;
        if let Ok(existing) = fs::metadata(path) {
            file.set_permissions(existing.permissions())?;
        }
        file.sync_all()?;
    }
    fs::rename(tmp_path, path)
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> std::io::Result<()> {
    fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) -> std::io::Result<()> {
    Ok(())
}
