use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::Config;
use crate::extractor::TranscriptExtractor;
use crate::transcript::ExtractionRecord;

/// Processes a batch of video URLs with a bounded worker pool.
///
/// URLs are independent: one failure becomes a failure record and never
/// aborts the rest. The semaphore keeps in-flight extractions at the
/// configured cap out of respect for the upstream service.
pub struct BatchExtractor {
    extractor: Arc<TranscriptExtractor>,
    semaphore: Arc<Semaphore>,
}

impl BatchExtractor {
    pub fn new(extractor: TranscriptExtractor, config: &Config) -> Self {
        let max_concurrent = config.batch.max_concurrent.max(1);
        Self {
            extractor: Arc::new(extractor),
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Extract every URL, returning one record per input in input order.
    pub async fn extract_all(&self, video_urls: &[String]) -> Vec<ExtractionRecord> {
        let start = Instant::now();
        info!("🚀 Processing batch of {} video URLs", video_urls.len());

        let tasks = video_urls.iter().map(|url| {
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(&self.semaphore);
            let url = url.clone();
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore never closed");
                match extractor.extract_transcript(&url).await {
                    Ok(transcript) => ExtractionRecord::Success(transcript),
                    Err(e) => {
                        warn!("❌ {}: {}", url, e);
                        ExtractionRecord::failure(&url, e)
                    }
                }
            }
        });

        let records = join_all(tasks).await;

        let successful = records.iter().filter(|r| r.is_success()).count();
        info!(
            "🎉 Batch finished in {:.2}s: {} succeeded, {} failed",
            start.elapsed().as_secs_f64(),
            successful,
            records.len() - successful
        );

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_batch_yields_no_records() {
        let config = Config::default();
        let extractor = TranscriptExtractor::with_strategies(Vec::new(), Duration::from_secs(5));
        let batch = BatchExtractor::new(extractor, &config);
        let records = tokio_test::block_on(batch.extract_all(&[]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_url_becomes_failure_record_without_aborting() {
        let config = Config::default();
        let extractor = TranscriptExtractor::with_strategies(Vec::new(), Duration::from_secs(5));
        let batch = BatchExtractor::new(extractor, &config);
        let urls = vec![
            "https://vimeo.com/not-a-video".to_string(),
            "https://vimeo.com/also/nothing".to_string(),
        ];
        let records = tokio_test::block_on(batch.extract_all(&urls));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.is_success()));
    }
}
