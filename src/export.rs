//! Walks an unpacked export, runs the matching extractor over every fragment
//! of each category and hands the results to a [`Formatter`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dom::Node;
use crate::images::ImageSink;
use crate::parser::extract::{
    blocked, bookmarks, claps, following, highlights, interests, ips, lists, post, profile,
    sessions,
};
use crate::parser::parse_with;
use crate::schema::{Collection, Interests, Profile};

pub struct ExportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub with_images: bool,
    pub concurrency: usize,
}

/// Sink for converted categories. `path` is relative to the output root and
/// has no extension.
pub trait Formatter {
    fn write_file(&self, path: &str, value: &impl Serialize) -> Result<()>;
}

/// Pretty-printed JSON, one `<root>/<path>.json` file per call.
pub struct JsonFormatter {
    root: PathBuf,
}

impl JsonFormatter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Formatter for JsonFormatter {
    fn write_file(&self, path: &str, value: &impl Serialize) -> Result<()> {
        let dest = self.root.join(format!("{path}.json"));
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).with_context(|| format!("can't create {}", dir.display()))?;
        }
        let out = serde_json::to_vec_pretty(value)
            .with_context(|| format!("can't serialize {path}"))?;
        fs::write(&dest, out).with_context(|| format!("can't write {}", dest.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ExportStats {
    pub categories: usize,
    pub parsed: usize,
    pub failed: usize,
}

/// Convert every known category under `config.input`.
///
/// Unknown entries and unreadable fragments are logged and skipped; only a
/// missing input directory or a failed write stops the run.
pub fn convert(config: &ExportConfig, out: &impl Formatter, images: &dyn ImageSink) -> Result<ExportStats> {
    let mut entries: Vec<_> = fs::read_dir(&config.input)
        .with_context(|| format!("can't read {}", config.input.display()))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut stats = ExportStats::default();
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !entry.path().is_dir() {
            warn!("{} is not a directory, skipping", name);
            continue;
        }

        let files = match fragments(&entry.path()) {
            Ok(files) => files,
            Err(e) => {
                warn!("{:#}", e);
                continue;
            }
        };

        let mut batch = Batch::new(&name, files.len());
        match name.as_str() {
            "blocks" => {
                let users = batch.flat(&files, blocked::extract);
                out.write_file("blocks", &Collection::new("Blocked users", "users", users))?;
            }
            "bookmarks" => {
                let posts = batch.flat(&files, bookmarks::extract);
                out.write_file("bookmarks", &Collection::new("Bookmarked posts", "posts", posts))?;
            }
            "claps" => {
                let claps = batch.flat(&files, claps::extract);
                out.write_file("claps", &Collection::new("Posts you've clapped for", "claps", claps))?;
            }
            "highlights" => {
                let hs = batch.flat(&files, |root| highlights::extract(root, images));
                out.write_file("highlights", &Collection::new("Your highlights", "highlights", hs))?;
            }
            "interests" => out.write_file("interests", &batch.interests(&files))?,
            "ips" => {
                let ips = batch.flat(&files, ips::extract);
                out.write_file(
                    "ips",
                    &Collection::new(
                        "Your IP history (note: Medium deletes IP history after 30 days)",
                        "ips",
                        ips,
                    ),
                )?;
            }
            "lists" => {
                let lists = batch.each(&files, lists::extract);
                let lists = lists.into_iter().map(|(_, l)| l).collect();
                out.write_file("lists", &Collection::new("Lists you've created", "list", lists))?;
            }
            "posts" => {
                for (file, post) in batch.each(&files, |root| post::extract(root, images)) {
                    out.write_file(&format!("posts/{}", stem(&file)), &post)?;
                }
            }
            "profile" => out.write_file("profile", &batch.profile(&files))?,
            "pubs-following" => {
                let pubs = batch.flat(&files, following::publications);
                out.write_file(
                    "following/publications",
                    &Collection::new("Publications you follow", "publications", pubs),
                )?;
            }
            "topics-following" => {
                let topics = batch.flat(&files, following::topics);
                out.write_file("following/topics", &Collection::new("Topics you follow", "topics", topics))?;
            }
            "users-following" => {
                let users = batch.flat(&files, following::users);
                out.write_file("following/users", &Collection::new("Users you follow", "users", users))?;
            }
            "twitter" => {
                let users = batch.flat(&files, following::users);
                out.write_file(
                    "following/suggested",
                    &Collection::new("Your Twitter friends who are also on Medium", "users", users),
                )?;
            }
            "sessions" => {
                let sessions = batch.flat(&files, sessions::extract);
                out.write_file(
                    "sessions",
                    &Collection::new("Your active and inactive sessions across devices", "sessions", sessions),
                )?;
            }
            _ => {
                batch.pb.finish_and_clear();
                warn!("{} isn't supported, skipping", name);
                continue;
            }
        }

        batch.finish();
        stats.categories += 1;
        stats.parsed += batch.parsed;
        stats.failed += batch.failed;
    }

    Ok(stats)
}

/// `.html` files directly inside `dir`, sorted by name.
fn fragments(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("can't read {}, skipping", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        } else {
            debug!("{} is not an html file, skipping", path.display());
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem(name: &str) -> &str {
    name.strip_suffix(".html").unwrap_or(name)
}

/// Parse one fragment, logging and swallowing any failure.
fn parse_file<T>(path: &Path, extract: impl FnOnce(&Node) -> T) -> Option<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("can't read {}, skipping: {}", path.display(), e);
            return None;
        }
    };
    match parse_with(&bytes, extract) {
        Ok(value) => {
            debug!("parsed {}", path.display());
            Some(value)
        }
        Err(e) => {
            warn!("error parsing {}, skipping: {}", path.display(), e);
            None
        }
    }
}

/// Progress and counters for one category.
struct Batch<'a> {
    category: &'a str,
    pb: ProgressBar,
    parsed: usize,
    failed: usize,
}

impl<'a> Batch<'a> {
    fn new(category: &'a str, len: usize) -> Self {
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg:<18} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(category.to_string());
        Self {
            category,
            pb,
            parsed: 0,
            failed: 0,
        }
    }

    /// Run `extract` over `files` in parallel. Results keep the sorted
    /// file order regardless of which worker finished first.
    fn each<T, F>(&mut self, files: &[PathBuf], extract: F) -> Vec<(String, T)>
    where
        T: Send,
        F: Fn(&Node) -> T + Sync,
    {
        let results: Vec<Option<(String, T)>> = files
            .par_iter()
            .map(|path| {
                let result = parse_file(path, &extract).map(|v| (file_name(path), v));
                self.pb.inc(1);
                result
            })
            .collect();

        let total = results.len();
        let ok: Vec<_> = results.into_iter().flatten().collect();
        self.parsed += ok.len();
        self.failed += total - ok.len();
        ok
    }

    fn flat<T, F>(&mut self, files: &[PathBuf], extract: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Node) -> Vec<T> + Sync,
    {
        self.each(files, extract)
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect()
    }

    /// One file per interest kind; anything else in the directory is ignored.
    fn interests(&mut self, files: &[PathBuf]) -> Interests {
        let mut out = Interests {
            meta: Some("Topics you're interested in".into()),
            ..Default::default()
        };
        for path in files {
            let name = file_name(path);
            let ok = match name.as_str() {
                "publications.html" => {
                    parse_file(path, interests::publications).map(|v| out.publications = v)
                }
                "tags.html" => parse_file(path, interests::tags).map(|v| out.tags = v),
                "topics.html" => parse_file(path, interests::topics).map(|v| out.topics = v),
                "writers.html" => parse_file(path, interests::writers).map(|v| out.writers = v),
                _ => {
                    warn!("unknown interests file {}, skipping", name);
                    self.pb.inc(1);
                    continue;
                }
            };
            self.tally(ok.is_some());
        }
        out
    }

    /// Several files each filling part of one profile. A failed file leaves
    /// its part empty.
    fn profile(&mut self, files: &[PathBuf]) -> Profile {
        let mut out = Profile {
            meta: Some("Your user profile".into()),
            ..Default::default()
        };

        let charges: Vec<&PathBuf> = files
            .iter()
            .filter(|p| file_name(p).starts_with("charges-"))
            .collect();

        for path in files {
            let name = file_name(path);
            let ok = match name.as_str() {
                "about.html" => parse_file(path, profile::bio).map(|bio| out.user.bio = bio),
                "profile.html" => parse_file(path, |root| profile::user_profile(root, &mut out)),
                "publications.html" => parse_file(path, |root| profile::publications(root, &mut out)),
                "memberships.html" => parse_file(path, profile::memberships).map(|m| out.memberships = m),
                _ if charges.contains(&path) => continue,
                _ => {
                    warn!("skipped profile/{}: not supported", name);
                    self.pb.inc(1);
                    continue;
                }
            };
            if ok.is_none() {
                warn!("profile will be incomplete without {}", name);
            }
            self.tally(ok.is_some());
        }

        let charges: Vec<PathBuf> = charges.into_iter().cloned().collect();
        out.membership_charges = self.flat(&charges, profile::charges);
        out
    }

    fn tally(&mut self, ok: bool) {
        if ok {
            self.parsed += 1;
        } else {
            self.failed += 1;
        }
        self.pb.inc(1);
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
        info!(
            "{}: {} files parsed, {} skipped",
            self.category, self.parsed, self.failed
        );
    }
}
