use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::{EngagementSource, parse_engagements};
use crate::errors::SourceError;
use crate::triage::EngagementItem;

/// Reads engagements from a JSON export. A path of `-` reads stdin.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, SourceError> {
        let read_err = |source: std::io::Error| SourceError::FileRead {
            path: self.path.clone(),
            source,
        };

        if self.is_stdin() {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(read_err)?;
            Ok(buf)
        } else {
            tokio::fs::read(&self.path).await.map_err(read_err)
        }
    }
}

#[async_trait]
impl EngagementSource for FileSource {
    async fn fetch(&self) -> Result<Vec<EngagementItem>, SourceError> {
        let bytes = self.read_bytes().await?;
        let items = parse_engagements(&self.describe(), &bytes)?;
        debug!(source = %self.describe(), count = items.len(), "loaded engagements");
        Ok(items)
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engagements.json");
        fs::write(
            &path,
            r#"[{"id": "a", "status": "waiting_feedback", "reminder_cycle": 2}]"#,
        )
        .unwrap();

        let items = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = FileSource::new(&path).fetch().await.unwrap_err();
        match err {
            SourceError::FileRead { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected FileRead, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_stdin() {
        assert_eq!(FileSource::new("-").describe(), "stdin");
        assert_eq!(FileSource::new("a/b.json").describe(), "a/b.json");
    }
}
