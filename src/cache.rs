//! Parsed template cache
//!
//! Entries are populated lazily with a check-lock-check protocol: the lock is
//! only held to read or commit an entry, never across file I/O or parsing.
//! Concurrent misses for the same key may parse in parallel, but only the
//! first committed value is ever handed out afterwards.

use crate::TemplateResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key of a `(name, language)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
	name: String,
	lang: String,
}

impl CacheKey {
	/// Create a key
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::CacheKey;
	///
	/// let key = CacheKey::new("hello", "zh-TW");
	/// assert_eq!(key.to_string(), "hello@zh-TW");
	/// assert_ne!(CacheKey::new("a-b", "c"), CacheKey::new("a", "b-c"));
	/// ```
	pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			lang: lang.into(),
		}
	}

	/// Logical template name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Requested language tag
	pub fn lang(&self) -> &str {
		&self.lang
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.name, self.lang)
	}
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
	/// Lookups answered from the cache
	pub hits: u64,
	/// Lookups that ran the loader
	pub misses: u64,
	/// Entries currently stored
	pub entry_count: u64,
}

impl CacheStatistics {
	/// Total number of lookups
	pub fn total_requests(&self) -> u64 {
		self.hits + self.misses
	}

	/// Fraction of lookups answered from the cache
	pub fn hit_rate(&self) -> f64 {
		match self.total_requests() {
			0 => 0.0,
			total => self.hits as f64 / total as f64,
		}
	}
}

/// Mutex guarded map from [`CacheKey`] to shared values
///
/// # Examples
///
/// ```
/// use locale_templates::{CacheKey, TemplateCache, TemplateResult};
/// use std::sync::Arc;
///
/// let cache: TemplateCache<String> = TemplateCache::new();
/// let key = CacheKey::new("hello", "en");
///
/// let first = cache
///     .get_or_load(&key, false, || TemplateResult::Ok("v1".to_string()))
///     .unwrap();
/// let second = cache
///     .get_or_load(&key, false, || TemplateResult::Ok("v2".to_string()))
///     .unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(*second, "v1");
/// ```
pub struct TemplateCache<T> {
	entries: Mutex<HashMap<CacheKey, Arc<T>>>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl<T> TemplateCache<T> {
	/// Create an empty cache
	pub fn new() -> Self {
		Self {
			entries: Mutex::new(HashMap::new()),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
		}
	}

	/// Return the cached value for `key` or populate it with `loader`
	///
	/// With `debug` set, any existing entry is evicted first so the loader
	/// always runs; callers racing on the same key still converge on a
	/// single committed value. Loader errors are returned as-is and leave
	/// the cache untouched.
	pub fn get_or_load<F>(&self, key: &CacheKey, debug: bool, loader: F) -> TemplateResult<Arc<T>>
	where
		F: FnOnce() -> TemplateResult<T>,
	{
		if debug && self.entries.lock().remove(key).is_some() {
			tracing::debug!(key = %key, "evicted cached template in debug mode");
		}

		if let Some(existing) = self.get(key) {
			self.hits.fetch_add(1, Ordering::Relaxed);
			return Ok(existing);
		}
		self.misses.fetch_add(1, Ordering::Relaxed);

		let loaded = Arc::new(loader()?);

		let mut entries = self.entries.lock();
		if let Some(existing) = entries.get(key) {
			return Ok(Arc::clone(existing));
		}
		entries.insert(key.clone(), Arc::clone(&loaded));
		tracing::debug!(key = %key, "cached template");
		Ok(loaded)
	}

	/// Cached value for `key`, if any
	pub fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
		self.entries.lock().get(key).cloned()
	}

	/// Whether `key` is cached
	pub fn contains(&self, key: &CacheKey) -> bool {
		self.entries.lock().contains_key(key)
	}

	/// Drop the entry for `key`, returning it if present
	pub fn invalidate(&self, key: &CacheKey) -> Option<Arc<T>> {
		self.entries.lock().remove(key)
	}

	/// Drop every entry
	pub fn clear(&self) {
		self.entries.lock().clear();
	}

	/// Number of cached entries
	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	/// Whether the cache holds no entries
	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}

	/// Hit/miss counters and current size
	pub fn statistics(&self) -> CacheStatistics {
		CacheStatistics {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			entry_count: self.len() as u64,
		}
	}
}

impl<T> Default for TemplateCache<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for TemplateCache<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplateCache")
			.field("entries", &self.len())
			.field("hits", &self.hits.load(Ordering::Relaxed))
			.field("misses", &self.misses.load(Ordering::Relaxed))
			.finish()
	}
}
