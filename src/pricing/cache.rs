use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::consts::{APP_DIR, PRICING_CACHE_TTL};
use crate::error::PricingError;

use super::PriceSource;
use super::types::RawPriceTable;

/// Raw price document saved on disk between runs
#[derive(Debug, Clone)]
pub struct DiskCache {
    path: PathBuf,
}

impl DiskCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.cache/image-tokens/pricing.json`
    pub fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".cache").join(APP_DIR).join("pricing.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PricingError {
        PricingError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    pub fn load(&self) -> Result<RawPriceTable, PricingError> {
        if !self.path.exists() {
            return Err(PricingError::NoCache);
        }
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Load only if the file was written within `ttl`; returns its age too.
    pub fn load_if_fresh(&self, ttl: Duration) -> Result<(RawPriceTable, Duration), PricingError> {
        if !self.path.exists() {
            return Err(PricingError::NoCache);
        }
        let modified = std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| self.io_error(e))?;
        // A clock skewed into the future counts as fresh
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age > ttl {
            return Err(PricingError::Stale {
                max_age_hours: ttl.as_secs() / 3600,
            });
        }
        Ok((self.load()?, age))
    }

    /// Writes a sibling temp file, then renames it over the cache.
    pub fn save(&self, raw_data: &RawPriceTable) -> Result<(), PricingError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp_path = self.tmp_path();
        let result = self.write_tmp(&tmp_path, raw_data).and_then(|()| {
            std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
        });
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    fn write_tmp(&self, tmp_path: &Path, raw_data: &RawPriceTable) -> Result<(), PricingError> {
        let mut writer = BufWriter::new(File::create(tmp_path).map_err(|e| self.io_error(e))?);
        serde_json::to_writer(&mut writer, raw_data)?;
        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

/// Remote source fronted by a disk cache.
///
/// Offline: cache only. Online: a fresh cache wins, otherwise fetch and
/// refresh the cache, falling back to a stale cache if the fetch fails.
pub struct CachedSource {
    remote: Box<dyn PriceSource>,
    cache: DiskCache,
    offline: bool,
    ttl: Duration,
}

impl CachedSource {
    pub fn new(remote: Box<dyn PriceSource>, cache: DiskCache) -> Self {
        Self {
            remote,
            cache,
            offline: false,
            ttl: PRICING_CACHE_TTL,
        }
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl PriceSource for CachedSource {
    fn name(&self) -> &'static str {
        "cached"
    }

    fn fetch(&self) -> Result<RawPriceTable, PricingError> {
        if self.offline {
            return self.cache.load().map_err(|e| {
                tracing::debug!(error = %e, "offline and no usable pricing cache");
                PricingError::Unavailable
            });
        }

        match self.cache.load_if_fresh(self.ttl) {
            Ok((data, age)) => {
                tracing::info!(
                    path = %self.cache.path().display(),
                    "using cached pricing ({:.1}h old)",
                    age.as_secs_f64() / 3600.0
                );
                return Ok(data);
            }
            Err(e) => tracing::debug!(error = %e, "pricing cache not usable"),
        }

        let remote_error = match self.remote.fetch() {
            Ok(data) => {
                if let Err(e) = self.cache.save(&data) {
                    tracing::warn!(error = %e, "failed to write pricing cache");
                }
                return Ok(data);
            }
            Err(e) => e,
        };

        tracing::warn!(
            source = self.remote.name(),
            error = %remote_error,
            "pricing fetch failed, trying cache"
        );
        self.cache.load().map_err(|_| remote_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::pricing::StaticSource;

    struct CountingSource {
        inner: StaticSource,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(document: &str) -> Self {
            Self {
                inner: StaticSource::new(document),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PriceSource for Arc<CountingSource> {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn fetch(&self) -> Result<RawPriceTable, PricingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch()
        }
    }

    const DOC: &str = r#"{"gpt-4-vision-preview": {"input_cost_per_token": 1e-5}}"#;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("nested").join("pricing.json"));
        let data = StaticSource::new(DOC).fetch().unwrap();
        cache.save(&data).unwrap();
        assert_eq!(cache.load().unwrap(), data);
        let (_, age) = cache.load_if_fresh(Duration::from_secs(60)).unwrap();
        assert!(age < Duration::from_secs(60));
    }

    #[test]
    fn save_replaces_corrupt_cache_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.json");
        std::fs::write(&path, "{truncated").unwrap();
        let cache = DiskCache::new(&path);
        assert!(matches!(cache.load(), Err(PricingError::Parse(_))));

        cache.save(&StaticSource::new(DOC).fetch().unwrap()).unwrap();
        assert!(cache.load().unwrap().contains_key("gpt-4-vision-preview"));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn failed_save_keeps_existing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.json");
        let cache = DiskCache::new(&path);
        cache.save(&StaticSource::new(DOC).fetch().unwrap()).unwrap();

        // A directory squatting on the temp path makes the write fail
        std::fs::create_dir(cache.tmp_path()).unwrap();
        let other = StaticSource::new(r#"{"gpt-4o": {"input_cost_per_token": 2e-6}}"#)
            .fetch()
            .unwrap();
        assert!(matches!(cache.save(&other), Err(PricingError::Io { .. })));
        assert!(cache.load().unwrap().contains_key("gpt-4-vision-preview"));
    }

    #[test]
    fn missing_cache_reports_no_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        assert!(matches!(cache.load(), Err(PricingError::NoCache)));
    }

    #[test]
    fn zero_ttl_treats_cache_as_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        cache.save(&StaticSource::new(DOC).fetch().unwrap()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        assert!(matches!(
            cache.load_if_fresh(Duration::ZERO),
            Err(PricingError::Stale { .. })
        ));
    }

    #[test]
    fn online_fetch_populates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        let remote = Arc::new(CountingSource::new(DOC));
        let source = CachedSource::new(Box::new(Arc::clone(&remote)), cache.clone());

        assert!(source.fetch().unwrap().contains_key("gpt-4-vision-preview"));
        assert!(cache.path().exists());
        // Second fetch is served from the fresh cache
        source.fetch().unwrap();
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn offline_never_touches_remote() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        let remote = Arc::new(CountingSource::new(DOC));
        let source = CachedSource::new(Box::new(Arc::clone(&remote)), cache.clone()).offline(true);

        assert!(matches!(source.fetch(), Err(PricingError::Unavailable)));
        cache.save(&StaticSource::new(DOC).fetch().unwrap()).unwrap();
        assert!(source.fetch().is_ok());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_fetch_falls_back_to_stale_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        cache.save(&StaticSource::new(DOC).fetch().unwrap()).unwrap();
        let source = CachedSource::new(Box::new(StaticSource::new("{broken")), cache)
            .with_ttl(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(20));

        assert!(source.fetch().unwrap().contains_key("gpt-4-vision-preview"));
    }

    #[test]
    fn failed_fetch_without_cache_returns_remote_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().join("pricing.json"));
        let source = CachedSource::new(Box::new(StaticSource::new("{broken")), cache);
        assert!(matches!(source.fetch(), Err(PricingError::Parse(_))));
    }
}
