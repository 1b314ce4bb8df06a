use std::io::Write;
use std::path::{Path, PathBuf};

fn annotate(path: &Path, error: std::io::Error) -> std::io::Error {
    std::io::Error::new(error.kind(), format!("{}: {error}", path.display()))
}

pub fn get_current_dir() -> PathBuf {
    std::env::current_dir().expect("Cannot get current working directory")
}

/// Creates the directory (and its parents) if it does not exist yet.
/// Fails if the path exists but is not a directory.
pub fn make_sure_path_exists(path: &Path) -> crate::Result<()> {
    std::fs::create_dir_all(path).map_err(|e| annotate(path, e))?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `parts` into it in order.
pub fn write_parts<'a, I>(path: &Path, parts: I) -> crate::Result<()>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let file = std::fs::File::create(path).map_err(|e| annotate(path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    for part in parts {
        writer
            .write_all(part)
            .map_err(|e| annotate(path, e))?;
    }
    writer.flush().map_err(|e| annotate(path, e))?;
    log::debug!("Written file {}", path.display());
    Ok(())
}

pub fn write_file(path: &Path, contents: &str) -> crate::Result<()> {
    write_parts(path, std::iter::once(contents.as_bytes()))
}

#[cfg(test)]
mod tests {
    use crate::common::error::SchedulerError;
    use crate::common::utils::fs::{make_sure_path_exists, write_file, write_parts};
    use tempfile::TempDir;

    #[test]
    fn test_create_nested_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b");
        make_sure_path_exists(&path).unwrap();
        assert!(path.is_dir());
        // Existing directory is fine
        make_sure_path_exists(&path).unwrap();
    }

    #[test]
    fn test_create_directory_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file");
        std::fs::write(&path, "x").unwrap();
        assert!(matches!(
            make_sure_path_exists(&path),
            Err(SchedulerError::IoError(_))
        ));
    }

    #[test]
    fn test_write_parts_concatenates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out");
        write_parts(&path, ["a\n", "", "b"].map(str::as_bytes)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb");
    }

    #[test]
    fn test_write_file_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out");
        write_file(&path, "long contents").unwrap();
        write_file(&path, "short").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out");
        let error = write_file(&path, "x").unwrap_err();
        assert!(error.to_string().contains("missing"));
    }
}
