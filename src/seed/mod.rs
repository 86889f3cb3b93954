//! Reference data seeding

use serde::Serialize;

use crate::core::error::ApiResult;
use crate::core::service::LanguageService;
use crate::entities::Language;

/// Built-in languages as `(code, name)`
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh", "Mandarin Chinese"),
    ("es", "Spanish"),
    ("hi", "Hindi"),
    ("fr", "French"),
    ("ar", "Standard Arabic"),
    ("bn", "Bengali"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("ur", "Urdu"),
    ("id", "Indonesian"),
    ("de", "German"),
    ("ja", "Japanese"),
    ("pa", "Punjabi"),
    ("mr", "Marathi"),
    ("te", "Telugu"),
    ("tr", "Turkish"),
    ("ko", "Korean"),
    ("vi", "Vietnamese"),
    ("it", "Italian"),
];

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert the built-in languages, skipping codes that already exist
///
/// Safe to run on every start.
pub async fn seed_languages<S>(store: &S) -> ApiResult<SeedReport>
where
    S: LanguageService + ?Sized,
{
    let mut report = SeedReport::default();

    for (code, name) in DEFAULT_LANGUAGES {
        if store
            .insert_language_if_absent(Language::new(*name, *code))
            .await?
        {
            tracing::debug!(code, name, "language inserted");
            report.inserted += 1;
        } else {
            tracing::debug!(code, "language already present");
            report.skipped += 1;
        }
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "language seeding complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use std::collections::HashSet;

    #[test]
    fn test_default_codes_are_unique() {
        let codes: HashSet<&str> = DEFAULT_LANGUAGES.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), DEFAULT_LANGUAGES.len());
        assert_eq!(DEFAULT_LANGUAGES.len(), 20);
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = InMemoryStore::new();

        let first = seed_languages(&store).await.unwrap();
        assert_eq!(first, SeedReport { inserted: 20, skipped: 0 });

        let second = seed_languages(&store).await.unwrap();
        assert_eq!(second, SeedReport { inserted: 0, skipped: 20 });

        assert_eq!(store.list_languages().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_existing_code_is_skipped() {
        let store = InMemoryStore::new();
        store
            .insert_language_if_absent(Language::new("Deutsch", "de"))
            .await
            .unwrap();

        let report = seed_languages(&store).await.unwrap();
        assert_eq!(report, SeedReport { inserted: 19, skipped: 1 });

        let languages = store.list_languages().await.unwrap();
        assert!(languages.iter().any(|l| l.code == "de" && l.name == "Deutsch"));
    }
}
