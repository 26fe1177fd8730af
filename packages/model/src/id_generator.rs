use crc32fast::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static PROCESS_COUNTER: AtomicU64 = AtomicU64::new(0);
static PROCESS_SEED: OnceLock<String> = OnceLock::new();

/// Hash an arbitrary string into a short hex seed using CRC32
pub fn get_seed(source: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn process_seed() -> &'static str {
    PROCESS_SEED.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        get_seed(&format!("{}:{}", std::process::id(), nanos))
    })
}

/// Generate an id that is unique for the lifetime of the process
pub fn new_id(prefix: &str) -> String {
    let count = PROCESS_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{}-{}-{}", prefix, process_seed(), count)
}

/// Source of fresh block and column ids
pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Ids backed by the process-wide counter
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdSource for ProcessIds {
    fn next_id(&mut self, prefix: &str) -> String {
        new_id(prefix)
    }
}

/// Sequential, deterministic id generator scoped to one seed
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        self.new_id(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(get_seed("newsletter"), get_seed("newsletter"));
        assert_ne!(get_seed("newsletter"), get_seed("receipt"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        assert_eq!(gen.new_id("text"), "text-abc-1");
        assert_eq!(gen.new_id("button"), "button-abc-2");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_process_ids_are_unique() {
        let mut ids = ProcessIds;
        let first = ids.next_id("text");
        let second = ids.next_id("text");

        assert_ne!(first, second);
        assert!(first.starts_with("text-"));
    }
}
