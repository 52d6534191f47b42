//! Storage operations
//!
//! Payload producers for the data connection: a directory listing of the
//! server root and raw file contents. Both yield a byte buffer for the
//! framing layer, or an error the session turns into a wire response.

use log::{error, info};
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::StorageError;

/// Lists the entries of the server root directory.
///
/// The listing carries literal directory-read semantics: the `.` and `..`
/// markers appear alongside regular entries. Names are joined with a
/// newline and the final entry has no trailing newline.
pub fn list_directory(root: &Path) -> Result<Vec<u8>, StorageError> {
    let entries = fs::read_dir(root).map_err(|e| {
        error!("Failed to open directory {}: {}", root.display(), e);
        StorageError::DirectoryUnreadable(root.display().to_string(), e)
    })?;

    let mut names = vec![".".to_string(), "..".to_string()];
    for entry in entries {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    info!(
        "Listed directory {} - {} entries",
        root.display(),
        names.len()
    );

    Ok(names.join("\n").into_bytes())
}

/// Reads the full contents of `filename`, resolved against the server root.
///
/// The protocol performs no path validation, so relative components in the
/// filename resolve wherever the filesystem takes them. Any open failure is
/// reported as [`StorageError::FileNotFound`]; the session answers it with
/// the unframed not-found literal.
pub fn read_file_contents(root: &Path, filename: &str) -> Result<Vec<u8>, StorageError> {
    let path = root.join(filename);

    let mut file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            info!("Failed to open file {}: {}", path.display(), e);
            return Err(StorageError::FileNotFound(filename.to_string()));
        }
    };

    // Size the buffer by seeking to the end, then rewind and read it all.
    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;

    let mut contents = Vec::with_capacity(size as usize);
    file.read_to_end(&mut contents)?;

    info!("Read file {} ({} bytes)", path.display(), contents.len());

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_list_directory_includes_special_entries() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        File::create(dir.path().join("beta.txt")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let listing = list_directory(dir.path()).unwrap();
        let listing = String::from_utf8(listing).unwrap();

        assert!(!listing.ends_with('\n'));

        let names: HashSet<&str> = listing.split('\n').collect();
        let expected: HashSet<&str> = [".", "..", "alpha.txt", "beta.txt", "sub"]
            .into_iter()
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_list_empty_directory() {
        let dir = tempdir().unwrap();
        let listing = list_directory(dir.path()).unwrap();
        assert_eq!(listing, b".\n..".to_vec());
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(list_directory(&gone).is_err());
    }

    #[test]
    fn test_read_file_contents_byte_exact() {
        let dir = tempdir().unwrap();
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let mut file = File::create(dir.path().join("blob.bin")).unwrap();
        file.write_all(&data).unwrap();

        let contents = read_file_contents(dir.path(), "blob.bin").unwrap();
        assert_eq!(contents, data);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        match read_file_contents(dir.path(), "absent.txt") {
            Err(StorageError::FileNotFound(name)) => assert_eq!(name, "absent.txt"),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_resolves_relative_components() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();
        fs::write(dir.path().join("target.txt"), b"payload").unwrap();

        let contents = read_file_contents(&dir.path().join("inner"), "../target.txt").unwrap();
        assert_eq!(contents, b"payload");
    }
}
