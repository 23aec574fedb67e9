//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

//! Filesystem helpers shared by the provisioner and the track header generator.
use fs2::FileExt;
use rand::RngCore;

use std::{
    fs,
    fs::File,
    io,
    io::Read,
    path::{Component, Path, PathBuf},
};

/// Ensures that the directory exists.
/// Unlike [`fs::create_dir()`], this function does not return Err if the directory already exists.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    match fs::create_dir_all(path) {
        Ok(_) => Ok(()),
        Err(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Opens the file in read-only mode, as if by [`File::open`]. Any [`Error`]
/// returned will contain the provided [`path`] in the error message.
pub fn open_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    match File::open(&path) {
        Err(error) => Err(io::Error::new(
            error.kind(),
            format!("couldn't open {}", path.as_ref().display()),
        )),
        Ok(file) => Ok(file),
    }
}

/// Opens the file in write-only mode, as if by [`File::create`]. Any [`Error`]
/// returned will contain the provided [`path`] in the error message.
///
/// This function will create a file if it does not exist, and will truncate it if it does
pub fn create_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    match File::create(&path) {
        Err(error) => Err(io::Error::new(
            error.kind(),
            format!(
                "couldn't create or open {} for writing",
                path.as_ref().display()
            ),
        )),
        Ok(file) => Ok(file),
    }
}

/// Replaces the content of `dest` with the content of `r`. Writes to a
/// temporary file next to `dest` and then moves it into place (via Posix
/// rename() or equiv. atomic operation). If the process is killed, the
/// temporary file might remain.
///
/// An existing file keeps its permissions. When `dest` is a symlink, the
/// file it points to is replaced and the link is left in place.
pub fn write_file_atomic(mut r: impl Read, dest: &Path) -> io::Result<()> {
    let dest = match fs::symlink_metadata(dest) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(dest)?,
        _ => dest.to_path_buf(),
    };
    let permissions = fs::metadata(&dest).ok().map(|meta| meta.permissions());

    let temp_dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp_path = create_temp_path(temp_dir);
    let mut temp_file = create_file(&temp_path)?;
    // The lock marks the temporary file as in use until the rename.
    temp_file.try_lock_exclusive()?;
    let written = io::copy(&mut r, &mut temp_file)
        .and_then(|_| temp_file.sync_data())
        .and_then(|_| match permissions {
            Some(permissions) => temp_file.set_permissions(permissions),
            None => Ok(()),
        });
    if let Err(e) = written {
        drop(temp_file);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    // Windows does not allow renaming a file that is currently open.
    drop(temp_file);
    fs::rename(&temp_path, &dest)
}

/// Returns a unique path suitable for a temporary file.
pub fn create_temp_path(temp_dir: &Path) -> PathBuf {
    // Pick filename from a 128-bit random distribution.
    let mut temp_filename = String::from(".playerprep_tmp_");
    temp_filename.push_str(&{
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    });
    temp_dir.join(temp_filename)
}

/// Removes the directory tree at `path`, if there is one, and confirms
/// through the filesystem that it is gone.
///
/// Returns `Ok(false)` when there was nothing to remove. An error of kind
/// [`io::ErrorKind::Other`] is returned when the directory is still
/// visible after the removal.
pub fn remove_dir_confirmed(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
        Ok(_) => {}
    }
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!("couldn't remove {}: {}", path.display(), e),
            ))
        }
    }
    match fs::symlink_metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} still exists after removal", path.display()),
        )),
    }
}

/// Checks that the path is relative and names something strictly below its
/// base directory, i.e. it has no root, prefix or '..' components and at
/// least one normal component.
pub fn is_contained_relative_path(p: &Path) -> bool {
    let mut has_normal = false;
    for c in p.components() {
        match c {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_normal
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{env, fs, io, path::Path, path::PathBuf};

    use rand::RngCore;

    /// A scratch directory under the system temp dir, removed on drop.
    pub(crate) struct TempDir(pub(crate) PathBuf);

    impl TempDir {
        pub(crate) fn new<P: AsRef<Path>>(name: P) -> io::Result<TempDir> {
            let mut bytes = [0u8; 8];
            rand::rng().fill_bytes(&mut bytes);
            let mut dir_name = name.as_ref().as_os_str().to_owned();
            dir_name.push(format!("-{}", hex::encode(bytes)));
            let path = env::temp_dir().join(dir_name);
            fs::create_dir(&path)?;
            Ok(TempDir(path))
        }

        pub(crate) fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            println!(
                "Cleaning up temporary testing directory {}",
                &self.0.display()
            );
            let _ = fs::remove_dir_all(&self.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::TempDir;
    use super::*;

    #[test]
    fn test_write_file_atomic_replaces_content() -> io::Result<()> {
        let temp_dir = TempDir::new("test_write_file_atomic_replaces_content")?;
        let dest = temp_dir.path().join("file.h");
        fs::write(&dest, "old")?;

        write_file_atomic("new content".as_bytes(), &dest)?;

        assert_eq!(fs::read_to_string(&dest)?, "new content");
        assert_eq!(
            fs::read_dir(temp_dir.path())?.count(),
            1,
            "The temporary file should have been moved into place!"
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_atomic_keeps_permissions() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new("test_write_file_atomic_keeps_permissions")?;
        let dest = temp_dir.path().join("config.h");
        fs::write(&dest, "old")?;
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o640))?;

        write_file_atomic("new".as_bytes(), &dest)?;

        assert_eq!(fs::metadata(&dest)?.permissions().mode() & 0o777, 0o640);
        assert_eq!(fs::read_to_string(&dest)?, "new");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_atomic_follows_symlink() -> io::Result<()> {
        let temp_dir = TempDir::new("test_write_file_atomic_follows_symlink")?;
        let target = temp_dir.path().join("real.h");
        let link = temp_dir.path().join("link.h");
        fs::write(&target, "old")?;
        std::os::unix::fs::symlink(&target, &link)?;

        write_file_atomic("new".as_bytes(), &link)?;

        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target)?, "new");
        Ok(())
    }

    #[test]
    fn test_remove_dir_confirmed_works() -> io::Result<()> {
        let temp_dir = TempDir::new("test_remove_dir_confirmed_works")?;
        let target = temp_dir.path().join("a");
        fs::create_dir_all(target.join("b").join("c"))?;
        fs::write(target.join("b").join("file"), "x")?;

        assert!(remove_dir_confirmed(&target)?);
        assert!(!target.exists());
        assert!(!remove_dir_confirmed(&target)?, "Nothing left to remove");
        Ok(())
    }

    #[test]
    fn test_open_file_error_names_path() {
        let err = open_file("/definitely/not/here.h").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("/definitely/not/here.h"));
    }

    #[test]
    fn test_contained_relative_path() {
        assert!(is_contained_relative_path(Path::new("tests")));
        assert!(is_contained_relative_path(Path::new("./src/examples")));
        assert!(!is_contained_relative_path(Path::new("../tests")));
        assert!(!is_contained_relative_path(Path::new("a/../../b")));
        assert!(!is_contained_relative_path(Path::new("/tmp")));
        assert!(!is_contained_relative_path(Path::new("")));
        assert!(!is_contained_relative_path(Path::new(".")));
        assert!(!is_contained_relative_path(Path::new("./.")));
    }
}
