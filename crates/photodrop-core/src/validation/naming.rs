//! Remote object naming.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

const FALLBACK_FILENAME: &str = "file";

/// Generates `<millis>-<filename>` names for remote objects.
///
/// The millisecond prefix never repeats within one generator: when the clock has
/// not advanced since the previous name, the previous prefix plus one is used.
#[derive(Debug, Default)]
pub struct RemoteNameGenerator {
    last_millis: AtomicI64,
}

impl RemoteNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&self, original_filename: &str) -> String {
        self.next_name_at(Utc::now().timestamp_millis(), original_filename)
    }

    fn next_name_at(&self, now_millis: i64, original_filename: &str) -> String {
        let prefix = match self.last_millis.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |prev| Some(now_millis.max(prev + 1)),
        ) {
            Ok(prev) | Err(prev) => now_millis.max(prev + 1),
        };

        format!("{}-{}", prefix, client_filename(original_filename))
    }
}

/// The part of a client-supplied filename that is safe to reuse.
///
/// Browsers may send full paths (either separator); only the last component is
/// kept and control characters are dropped. Whitespace is kept as sent.
pub fn client_filename(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return FALLBACK_FILENAME.to_string();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_name_uses_timestamp_prefix() {
        let generator = RemoteNameGenerator::new();
        assert_eq!(
            generator.next_name_at(1_700_000_000_123, "cat.png"),
            "1700000000123-cat.png"
        );
    }

    #[test]
    fn test_same_millisecond_names_differ() {
        let generator = RemoteNameGenerator::new();
        let first = generator.next_name_at(1_000, "cat.png");
        let second = generator.next_name_at(1_000, "cat.png");
        let third = generator.next_name_at(999, "cat.png");

        assert_eq!(first, "1000-cat.png");
        assert_eq!(second, "1001-cat.png");
        assert_eq!(third, "1002-cat.png");
    }

    #[test]
    fn test_clock_catching_up_is_used_as_is() {
        let generator = RemoteNameGenerator::new();
        generator.next_name_at(1_000, "a");
        assert_eq!(generator.next_name_at(5_000, "a"), "5000-a");
    }

    #[test]
    fn test_names_unique_across_threads() {
        let generator = Arc::new(RemoteNameGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| generator.next_name("same.png"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for name in handle.join().unwrap() {
                assert!(seen.insert(name), "duplicate remote name generated");
            }
        }
        assert_eq!(seen.len(), 2_000);
    }

    #[test]
    fn test_client_filename_strips_directories() {
        assert_eq!(client_filename("../../etc/passwd"), "passwd");
        assert_eq!(client_filename("C:\\Users\\me\\cat.png"), "cat.png");
        assert_eq!(client_filename("holiday photo.jpg"), "holiday photo.jpg");
    }

    #[test]
    fn test_client_filename_fallback() {
        assert_eq!(client_filename(""), "file");
        assert_eq!(client_filename("photos/"), "file");
        assert_eq!(client_filename(".."), "file");
        assert_eq!(client_filename("\u{0007}\n"), "file");
        assert_eq!(client_filename("a\u{0000}b.png"), "ab.png");
    }

    #[test]
    fn test_client_filename_keeps_surrounding_whitespace() {
        assert_eq!(client_filename(" cat.png "), " cat.png ");

        let generator = RemoteNameGenerator::new();
        assert_eq!(generator.next_name_at(1000, " cat.png "), "1000- cat.png ");
    }
}
