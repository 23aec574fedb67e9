//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{
    collections::BTreeSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use url::Url;
use zip::ZipArchive;

use super::constants::CONNECT_TIMEOUT_SECS;
use super::error::Error;
use super::repository::RepoDescriptor;
use crate::fs::{create_file, open_file, remove_dir_confirmed};
use crate::progress::{ProgressReporter, ProgressWriter};

/// Downloads repository archives.
pub trait ArchiveFetcher {
    /// Stores the archive found at `url` in the file `dest` and returns the
    /// number of bytes written.
    fn fetch(&self, url: &Url, dest: &Path, reporter: &ProgressReporter) -> Result<u64, Error>;
}

/// Fetches archives over HTTP(S).
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &Url, dest: &Path, reporter: &ProgressReporter) -> Result<u64, Error> {
        info!("GET {}", url);
        // Non-2xx responses are returned as ureq::Error::Status.
        let response = self.agent.get(url.as_str()).call()?;
        let size = response
            .header("Content-Length")
            .and_then(|s| s.parse::<usize>().ok());

        let file = create_file(dest)?;
        let mut writer = match size {
            Some(size) => ProgressWriter::with_known_size(file, reporter, size),
            None => ProgressWriter::new(file, reporter),
        };
        let mut reader = response.into_reader();
        let bytes = io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        writer.into_inner().sync_data()?;
        Ok(bytes)
    }
}

/// Extracts the downloaded archive of `repo` into `source_dir`, so that
/// `<source_dir>/<project>` holds exactly the archive contents, and deletes
/// the archive.
///
/// Any existing `<source_dir>/<project>` is removed first. The archive must
/// contain a single top-level directory named `<project>-<branch>`; this is
/// checked before anything on disk is touched.
pub fn install_archive(
    archive_path: &Path,
    repo: &RepoDescriptor,
    source_dir: &Path,
) -> Result<PathBuf, Error> {
    let mut archive = ZipArchive::new(open_file(archive_path)?)?;
    check_archive_layout(&archive, repo)?;

    let target = source_dir.join(repo.project());
    let extracted = source_dir.join(repo.archive_root());
    for dir in &[&target, &extracted] {
        match remove_dir_confirmed(dir) {
            Ok(true) => info!("Removed stale {}", dir.display()),
            Ok(false) => {}
            Err(e) if e.kind() == io::ErrorKind::Other => {
                return Err(Error::StaleDirectory(dir.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        }
    }

    archive.extract(source_dir)?;
    drop(archive);
    fs::rename(&extracted, &target)?;
    fs::remove_file(archive_path)?;
    Ok(target)
}

fn check_archive_layout<R: io::Read + io::Seek>(
    archive: &ZipArchive<R>,
    repo: &RepoDescriptor,
) -> Result<(), Error> {
    let expected = repo.archive_root();
    let roots = archive
        .file_names()
        .filter_map(|name| name.split('/').next())
        .map(|root| root.to_owned())
        .collect::<BTreeSet<_>>();
    if roots.len() == 1 && roots.contains(&expected) {
        Ok(())
    } else {
        Err(Error::UnexpectedArchiveLayout {
            expected,
            found: roots.into_iter().collect(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::write_zip;
    use super::*;
    use crate::fs::testing::TempDir;

    fn pubsubclient() -> RepoDescriptor {
        RepoDescriptor::new("knolleary", "pubsubclient")
    }

    /// Answers one request per response on a loopback port, in order.
    fn serve_responses(
        responses: Vec<Vec<u8>>,
    ) -> io::Result<(String, std::thread::JoinHandle<()>)> {
        use std::io::Read;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0")?;
        let host = format!("http://{}", listener.local_addr()?);
        let handle = std::thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                // Read up to the end of the request headers.
                let mut request = vec![];
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(&response);
                let _ = stream.flush();
            }
        });
        Ok((host, handle))
    }

    #[test]
    fn test_http_fetcher_works() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new("test_http_fetcher_works")?;
        let body = b"PK fake archive bytes";
        let mut ok = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        ok.extend_from_slice(body);
        let not_found =
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec();
        let (host, server) = serve_responses(vec![not_found, ok])?;

        let fetcher = HttpFetcher::new();
        let url = pubsubclient().archive_url(&host)?;
        let dest = temp_dir.path().join("pubsubclient.zip");
        let checkpoints = std::sync::Mutex::new(vec![]);
        let reporter = ProgressReporter::new(|c| {
            if let Ok(mut checkpoints) = checkpoints.lock() {
                checkpoints.push((c.done, c.remaining));
            }
        });

        match fetcher.fetch(&url, &dest, &reporter) {
            Err(Error::HttpError(e)) => assert!(matches!(*e, ureq::Error::Status(404, _))),
            other => panic!("unexpected result: {:?}", other),
        }

        let bytes = fetcher.fetch(&url, &dest, &reporter)?;
        assert_eq!(bytes, body.len() as u64);
        assert_eq!(fs::read(&dest)?, body);
        drop(reporter);
        let checkpoints = checkpoints.into_inner().unwrap_or_default();
        assert_eq!(checkpoints.last(), Some(&(body.len(), Some(0))));

        server.join().map_err(|_| "server thread panicked")?;
        Ok(())
    }

    #[test]
    fn test_install_archive_works() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new("test_install_archive_works")?;
        let source_dir = temp_dir.path();
        let archive_path = source_dir.join("pubsubclient.zip");
        write_zip(
            &archive_path,
            &[
                ("pubsubclient-master/", ""),
                ("pubsubclient-master/src/", ""),
                ("pubsubclient-master/src/PubSubClient.h", "#define MQTT_MAX_PACKET_SIZE 128\n"),
                ("pubsubclient-master/README.md", "readme"),
            ],
        )?;

        let target = install_archive(&archive_path, &pubsubclient(), source_dir)?;

        assert_eq!(target, source_dir.join("pubsubclient"));
        assert_eq!(
            fs::read_to_string(target.join("src").join("PubSubClient.h"))?,
            "#define MQTT_MAX_PACKET_SIZE 128\n"
        );
        assert!(!archive_path.exists(), "The archive should have been deleted!");
        assert!(!source_dir.join("pubsubclient-master").exists());
        Ok(())
    }

    #[test]
    fn test_install_archive_replaces_stale_dir() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new("test_install_archive_replaces_stale_dir")?;
        let source_dir = temp_dir.path();
        let stale = source_dir.join("pubsubclient");
        fs::create_dir_all(stale.join("tests"))?;
        fs::write(stale.join("stale.txt"), "old")?;
        let archive_path = source_dir.join("pubsubclient.zip");
        write_zip(&archive_path, &[("pubsubclient-master/fresh.txt", "new")])?;

        install_archive(&archive_path, &pubsubclient(), source_dir)?;

        assert!(!stale.join("stale.txt").exists());
        assert!(!stale.join("tests").exists());
        assert_eq!(fs::read_to_string(stale.join("fresh.txt"))?, "new");
        Ok(())
    }

    #[test]
    fn test_install_archive_rejects_unexpected_root() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new("test_install_archive_rejects_unexpected_root")?;
        let source_dir = temp_dir.path();
        let existing = source_dir.join("pubsubclient");
        fs::create_dir(&existing)?;
        let archive_path = source_dir.join("pubsubclient.zip");
        write_zip(&archive_path, &[("pubsubclient-main/file.txt", "x")])?;

        match install_archive(&archive_path, &pubsubclient(), source_dir) {
            Err(Error::UnexpectedArchiveLayout { expected, found }) => {
                assert_eq!(expected, "pubsubclient-master");
                assert_eq!(found, vec!["pubsubclient-main".to_owned()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(existing.exists(), "Nothing should be touched on failure!");
        assert!(!source_dir.join("pubsubclient-main").exists());
        Ok(())
    }

    #[test]
    fn test_install_archive_rejects_bad_zip() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new("test_install_archive_rejects_bad_zip")?;
        let archive_path = temp_dir.path().join("pubsubclient.zip");
        fs::write(&archive_path, "<html>Not Found</html>")?;

        assert!(matches!(
            install_archive(&archive_path, &pubsubclient(), temp_dir.path()),
            Err(Error::ZipError(_))
        ));
        Ok(())
    }
}
