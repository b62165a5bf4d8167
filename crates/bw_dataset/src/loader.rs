use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use tokio::sync::RwLock;

use bw_core::{ArticleGroup, Error, Result};

/// Where the prepared dataset lives unless the operator points elsewhere.
pub const DEFAULT_DATASET_PATH: &str = "./data/news_groups.ndjson.gz";

/// Loads the gzip-compressed NDJSON dataset (one JSON array of article
/// records per line) and keeps it in memory for the rest of the process.
/// Repeated `load` calls hand out the same `Arc` without touching the file;
/// `invalidate` drops the cached copy so the next `load` re-reads it.
pub struct DatasetLoader {
    path: PathBuf,
    cache: RwLock<Option<Arc<Vec<ArticleGroup>>>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Arc<Vec<ArticleGroup>>> {
        if let Some(groups) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(groups));
        }

        let mut cache = self.cache.write().await;
        // Another caller may have filled the cache while we waited.
        if let Some(groups) = cache.as_ref() {
            return Ok(Arc::clone(groups));
        }

        let groups = Arc::new(read_groups(&self.path)?);
        tracing::info!(
            path = %self.path.display(),
            groups = groups.len(),
            "dataset loaded"
        );
        *cache = Some(Arc::clone(&groups));
        Ok(groups)
    }

    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        if cache.take().is_some() {
            tracing::debug!(path = %self.path.display(), "dataset cache invalidated");
        }
    }
}

fn read_groups(path: &Path) -> Result<Vec<ArticleGroup>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Dataset(format!("cannot open {}: {e}", path.display())))?;
    let reader = BufReader::new(GzDecoder::new(file));

    let mut groups = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| Error::Dataset(format!("cannot read {}: {e}", path.display())))?;
        if line.trim().is_empty() {
            continue;
        }
        let group: ArticleGroup = serde_json::from_str(&line).map_err(|e| {
            Error::Dataset(format!(
                "malformed group on line {} of {}: {e}",
                line_no + 1,
                path.display()
            ))
        })?;
        groups.push(group);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn write_dataset(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("news_groups.ndjson.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut enc = GzEncoder::new(file, Compression::default());
        for line in lines {
            writeln!(enc, "{line}").unwrap();
        }
        enc.finish().unwrap();
        path
    }

    #[tokio::test]
    async fn loads_groups_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(
            dir.path(),
            &[
                r#"[{"provider":"a","title":"first"},{"provider":"a","title":"follow-up"}]"#,
                r#"[{"provider":"b","title":"second"}]"#,
            ],
        );

        let loader = DatasetLoader::new(path);
        let groups = loader.load().await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].lead().unwrap().title, "first");
        assert_eq!(groups[1].lead().unwrap().provider, "b");
    }

    #[tokio::test]
    async fn load_is_cached_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &[r#"[{"provider":"a","title":"one"}]"#]);

        let loader = DatasetLoader::new(&path);
        let first = loader.load().await.unwrap();
        assert_eq!(first.len(), 1);

        // Rewrite the file; the cached copy must win until invalidation.
        write_dataset(dir.path(), &[
            r#"[{"provider":"a","title":"one"}]"#,
            r#"[{"provider":"b","title":"two"}]"#,
        ]);
        let second = loader.load().await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        loader.invalidate().await;
        let third = loader.load().await.unwrap();
        assert_eq!(third.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_a_dataset_error() {
        let loader = DatasetLoader::new("/nonexistent/news_groups.ndjson.gz");
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[tokio::test]
    async fn malformed_line_is_a_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &["not json"]);

        let loader = DatasetLoader::new(path);
        let err = loader.load().await.unwrap_err();
        match err {
            Error::Dataset(msg) => assert!(msg.contains("line 1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
