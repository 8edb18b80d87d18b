use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::warn;

const CDN_BASE: &str = "https://cdn-images-1.medium.com/";

/// Receives image ids discovered while classifying figure grafs.
pub trait ImageSink: Sync {
    fn register(&self, id: &str);
}

/// Discards every registration.
pub struct NoImages;

impl ImageSink for NoImages {
    fn register(&self, _id: &str) {}
}

/// Unique image ids, kept sorted so downloads run in a stable order.
#[derive(Default)]
pub struct ImageQueue {
    ids: Mutex<BTreeSet<String>>,
}

impl ImageSink for ImageQueue {
    fn register(&self, id: &str) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string());
    }
}

impl ImageQueue {
    pub fn into_ids(self) -> Vec<String> {
        self.ids
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_iter()
            .collect()
    }
}

pub struct FetchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Download every id into `<out>/images/`, at most `concurrency` at a time.
/// A failed image is logged and counted; it never aborts the batch.
pub async fn fetch_images(ids: Vec<String>, out: &Path, concurrency: usize) -> Result<FetchStats> {
    let dir = out.join("images");
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("can't create {}", dir.display()))?;

    let client = reqwest::Client::new();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let total = ids.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} images ({per_sec})")?
            .progress_chars("=> "),
    );

    let mut tasks = Vec::with_capacity(total);
    for id in ids {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let dest = image_path(&dir, &id);

        tasks.push(tokio::spawn(async move {
            let _permit = sem.acquire_owned().await?;
            download(&client, &id, &dest)
                .await
                .with_context(|| format!("error downloading image {id}"))
        }));
    }

    let mut ok = 0usize;
    let mut errors = 0usize;
    for task in tasks {
        match task.await {
            Ok(Ok(())) => ok += 1,
            Ok(Err(e)) => {
                warn!("{:#}", e);
                errors += 1;
            }
            Err(e) => {
                warn!("image task failed: {}", e);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(FetchStats { total, ok, errors })
}

async fn download(client: &reqwest::Client, id: &str, dest: &Path) -> Result<()> {
    let bytes = client
        .get(format!("{CDN_BASE}{id}"))
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    tokio::fs::write(dest, &bytes)
        .await
        .with_context(|| format!("can't write {}", dest.display()))?;
    Ok(())
}

/// Ids may contain `/`; they are flattened so every image lands in `dir`.
fn image_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(id.replace(['/', '\\'], "_"))
}
