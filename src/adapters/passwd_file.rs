//! Passwd-file account lookup.
//!
//! Reads observed account state from passwd-format (and optionally
//! shadow-format) databases. This is the observed-state collaborator the
//! CLI feeds into the convergence core; the core itself never reads files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::models::{AccountSpec, LookupConfig};
use crate::domain::ports::{AccountLookup, LookupError};

/// Lookup backed by `/etc/passwd`-style files.
#[derive(Debug, Clone)]
pub struct PasswdFileLookup {
    passwd_path: PathBuf,
    shadow_path: Option<PathBuf>,
}

impl PasswdFileLookup {
    /// Lookup over explicit database paths.
    #[must_use]
    pub fn new(passwd_path: impl Into<PathBuf>, shadow_path: Option<PathBuf>) -> Self {
        Self {
            passwd_path: passwd_path.into(),
            shadow_path,
        }
    }

    /// Lookup configured from the lookup section of the config.
    #[must_use]
    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(
            config.passwd_path.clone(),
            config.shadow_path.clone().map(PathBuf::from),
        )
    }

    async fn read_database(path: &Path) -> Result<String, LookupError> {
        fs::read_to_string(path)
            .await
            .map_err(|source| LookupError::Io {
                path: path.display().to_string(),
                source,
            })
    }

    /// Find the colon-separated entry for `username`, returning its fields.
    fn find_entry<'a>(
        contents: &'a str,
        username: &str,
        path: &Path,
    ) -> Result<Option<(usize, Vec<&'a str>)>, LookupError> {
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() < 2 {
                return Err(LookupError::Malformed {
                    path: path.display().to_string(),
                    line: index + 1,
                });
            }
            if fields[0] == username {
                return Ok(Some((index + 1, fields)));
            }
        }
        Ok(None)
    }

    fn parse_id(field: &str, path: &Path, line: usize) -> Result<u32, LookupError> {
        field.parse().map_err(|_| LookupError::Malformed {
            path: path.display().to_string(),
            line,
        })
    }

    async fn shadow_password(&self, username: &str) -> Result<Option<String>, LookupError> {
        let Some(path) = &self.shadow_path else {
            return Ok(None);
        };
        let contents = Self::read_database(path).await?;
        let Some((_, fields)) = Self::find_entry(&contents, username, path)? else {
            return Ok(None);
        };
        match fields[1] {
            "" | "*" | "x" => Ok(None),
            hash => Ok(Some(hash.to_string())),
        }
    }
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[async_trait]
impl AccountLookup for PasswdFileLookup {
    async fn lookup(&self, username: &str) -> Result<Option<AccountSpec>, LookupError> {
        let contents = Self::read_database(&self.passwd_path).await?;
        let Some((line, fields)) = Self::find_entry(&contents, username, &self.passwd_path)? else {
            return Ok(None);
        };
        if fields.len() < 7 {
            return Err(LookupError::Malformed {
                path: self.passwd_path.display().to_string(),
                line,
            });
        }

        let mut spec = AccountSpec::named(username);
        spec.uid = Some(Self::parse_id(fields[2], &self.passwd_path, line)?);
        spec.gid = Some(Self::parse_id(fields[3], &self.passwd_path, line)?);
        spec.comment = non_empty(fields[4]);
        spec.home = non_empty(fields[5]);
        spec.shell = non_empty(fields[6]);
        spec.password = self.shadow_password(username).await?;

        Ok(Some(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn passwd_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "root:x:0:0:root:/root:/bin/bash").unwrap();
        writeln!(file, "adam:x:1000:1000:Adam Jacob:/home/adam:/usr/bin/zsh").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_lookup_existing_account() {
        let passwd = passwd_file();
        let lookup = PasswdFileLookup::new(passwd.path(), None);

        let spec = lookup.lookup("adam").await.unwrap().unwrap();
        assert_eq!(spec.username, "adam");
        assert_eq!(spec.uid, Some(1000));
        assert_eq!(spec.gid, Some(1000));
        assert_eq!(spec.comment.as_deref(), Some("Adam Jacob"));
        assert_eq!(spec.home.as_deref(), Some("/home/adam"));
        assert_eq!(spec.shell.as_deref(), Some("/usr/bin/zsh"));
        assert_eq!(spec.password, None);
    }

    #[tokio::test]
    async fn test_lookup_missing_account_is_none() {
        let passwd = passwd_file();
        let lookup = PasswdFileLookup::new(passwd.path(), None);
        assert!(lookup.lookup("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_reads_shadow_hash() {
        let passwd = passwd_file();
        let mut shadow = NamedTempFile::new().unwrap();
        writeln!(shadow, "root:*:19000:0:99999:7:::").unwrap();
        writeln!(shadow, "adam:$6$salt$hash:19000:0:99999:7:::").unwrap();
        shadow.flush().unwrap();

        let lookup =
            PasswdFileLookup::new(passwd.path(), Some(shadow.path().to_path_buf()));
        let spec = lookup.lookup("adam").await.unwrap().unwrap();
        assert_eq!(spec.password.as_deref(), Some("$6$salt$hash"));

        let root = lookup.lookup("root").await.unwrap().unwrap();
        assert_eq!(root.password, None, "placeholder hashes are not passwords");
    }

    #[tokio::test]
    async fn test_malformed_entry_reports_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "adam:x:not-a-uid:1000:Adam:/home/adam:/bin/bash").unwrap();
        file.flush().unwrap();

        let lookup = PasswdFileLookup::new(file.path(), None);
        let err = lookup.lookup("adam").await.unwrap_err();
        assert!(matches!(err, LookupError::Malformed { line: 1, .. }));
    }

    #[tokio::test]
    async fn test_missing_database_is_io_error() {
        let lookup = PasswdFileLookup::new("/no/such/passwd", None);
        let err = lookup.lookup("adam").await.unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
    }
}
