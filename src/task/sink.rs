use chrono::Utc;
use geojson::FeatureCollection;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives the feature collection produced by each poll.
#[allow(async_fn_in_trait)]
pub trait FeatureSink {
    async fn submit(&self, fc: &FeatureCollection) -> Result<(), SinkError>;
}

pub struct StdoutSink;

impl FeatureSink for StdoutSink {
    async fn submit(&self, fc: &FeatureCollection) -> Result<(), SinkError> {
        let mut body = serde_json::to_vec_pretty(fc)?;
        body.push(b'\n');

        let mut out = tokio::io::stdout();
        out.write_all(&body).await?;
        out.flush().await?;
        Ok(())
    }
}

/// Writes one `.geojson` file per poll into `base`.
pub struct DirectorySink {
    base: PathBuf,
}

impl DirectorySink {
    pub fn new(base: PathBuf) -> Self {
        DirectorySink { base }
    }

    fn generate_name(&self) -> String {
        let uuid = uuid::Uuid::new_v4();
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        format!("{}_{}.geojson", timestamp, uuid)
    }
}

impl FeatureSink for DirectorySink {
    async fn submit(&self, fc: &FeatureCollection) -> Result<(), SinkError> {
        tokio::fs::create_dir_all(&self.base).await?;

        let path = self.base.join(self.generate_name());
        tokio::fs::write(&path, serde_json::to_vec(fc)?).await?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}
