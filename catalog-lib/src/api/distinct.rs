//! Distinct field values across the whole upstream dataset.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::api::CharacterSource;
use crate::api::query::FilterSet;
use crate::api::query::UpstreamPages;
use crate::error::Error;
use crate::model::Field;

/// Distinct values per field, as produced by [`collect_distinct_fields`].
pub type DistinctValues = BTreeMap<Field, BTreeSet<String>>;

/// Collects the distinct non-empty values of `field` over every upstream page.
///
/// This is a full scan: one request per upstream page. Call it once at start
/// up, not per render.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if any page request fails. Partial results are
/// discarded.
pub async fn collect_distinct<S: CharacterSource + ?Sized>(
    source: &S,
    field: Field,
) -> Result<BTreeSet<String>, Error> {
    let mut values = collect_distinct_fields(source, &[field]).await?;
    Ok(values.remove(&field).unwrap_or_default())
}

/// Collects distinct values for several fields in a single walk.
///
/// Every requested field gets an entry, even when no record has a value for
/// it. An upstream with no records at all yields empty sets.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if any page request fails.
pub async fn collect_distinct_fields<S: CharacterSource + ?Sized>(
    source: &S,
    fields: &[Field],
) -> Result<DistinctValues, Error> {
    let mut values: DistinctValues = fields.iter().map(|field| (*field, BTreeSet::new())).collect();
    let mut pages = UpstreamPages::new(source, FilterSet::new());
    let mut scanned = 0usize;

    while let Some(page) = pages.next().await {
        let page = match page {
            Ok(page) => page,
            Err(e) if e.is_not_found() && scanned == 0 => {
                log::debug!("upstream has no records, no distinct values");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        scanned += 1;

        for record in page.records() {
            for (field, set) in values.iter_mut() {
                let value = record.field(*field);
                if !value.is_empty() && !set.contains(value) {
                    set.insert(value.to_string());
                }
            }
        }
    }

    log::debug!("scanned {scanned} upstream pages for distinct values of {fields:?}");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticSource;
    use crate::api::source::fixtures::characters;
    use crate::model::Character;

    #[tokio::test]
    async fn test_collects_across_pages() {
        let source = StaticSource::new(characters(45));

        let statuses = collect_distinct(&source, Field::Status).await.unwrap();

        assert_eq!(
            statuses.into_iter().collect::<Vec<_>>(),
            vec!["Alive", "Dead", "unknown"]
        );
        assert_eq!(source.requests(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_skips_empty_values() {
        let source = StaticSource::new(vec![
            Character::new(1, "Rick").with_kind(""),
            Character::new(2, "Squanchy").with_kind("Cat-Person"),
            Character::new(3, "Squanchy clone").with_kind("Cat-Person"),
        ]);

        let kinds = collect_distinct(&source, Field::Type).await.unwrap();

        assert_eq!(kinds.into_iter().collect::<Vec<_>>(), vec!["Cat-Person"]);
    }

    #[tokio::test]
    async fn test_several_fields_one_walk() {
        let source = StaticSource::new(characters(60));

        let values = collect_distinct_fields(&source, &Field::DISTINCT).await.unwrap();

        assert_eq!(values[&Field::Status].len(), 3);
        assert_eq!(values[&Field::Species].len(), 4);
        assert_eq!(values[&Field::Gender].len(), 2);
        assert_eq!(source.requests(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_is_surfaced() {
        let source = StaticSource::new(characters(60)).failing_on(3);

        let err = collect_distinct(&source, Field::Gender).await.unwrap_err();

        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_upstream() {
        let source = StaticSource::new(Vec::new());

        let values = collect_distinct_fields(&source, &[Field::Status]).await.unwrap();

        assert!(values[&Field::Status].is_empty());
    }
}
