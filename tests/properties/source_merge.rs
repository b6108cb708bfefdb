//! Properties of merging ordered roots into one unit.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;

use skein::domain::entities::UnitKind;
use skein::domain::services::{merge_listings, MergeError, RootListing};
use skein::domain::value_objects::{DuplicatesStrategy, SourceScope};

fn relative_path() -> impl Strategy<Value = PathBuf> {
    let segment = proptest::string::string_regex("[a-z]{1,4}").unwrap();
    (proptest::collection::vec(segment, 0..=2), "[A-C][a-z]{0,2}")
        .prop_map(|(dirs, stem)| {
            let mut path: PathBuf = dirs.into_iter().collect();
            path.push(format!("{}.java", stem));
            path
        })
}

/// Up to four roots, each with a set of relative files
fn listings() -> impl Strategy<Value = Vec<RootListing>> {
    proptest::collection::vec(proptest::collection::btree_set(relative_path(), 0..8), 1..=4)
        .prop_map(|roots| {
            roots
                .into_iter()
                .enumerate()
                .map(|(i, files)| {
                    let root = format!("root{}", i);
                    RootListing::new(
                        root.clone(),
                        format!("/work/{}", root),
                        files.into_iter().collect(),
                    )
                })
                .collect()
        })
}

fn merge(
    listings: &[RootListing],
    strategy: DuplicatesStrategy,
) -> Result<skein::domain::entities::MergedUnit, MergeError> {
    merge_listings(SourceScope::Main, UnitKind::Sources, listings, &strategy)
}

fn has_overlap(listings: &[RootListing]) -> bool {
    let mut seen = BTreeSet::new();
    listings
        .iter()
        .flat_map(|l| l.files.iter())
        .any(|f| !seen.insert(f.clone()))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every relative path from any root appears exactly once.
    #[test]
    fn property_merged_keys_are_the_union(listings in listings()) {
        let unit = merge(&listings, DuplicatesStrategy::Exclude).unwrap();
        let union: BTreeSet<PathBuf> =
            listings.iter().flat_map(|l| l.files.iter().cloned()).collect();
        let merged: BTreeSet<PathBuf> = unit.files().map(|f| f.relative.clone()).collect();
        prop_assert_eq!(merged, union);

        let total: usize = listings.iter().map(|l| l.files.len()).sum();
        prop_assert_eq!(unit.len() + unit.dropped.len(), total);
    }

    /// PROPERTY: under `exclude` the earliest root that has a path supplies it.
    #[test]
    fn property_exclude_keeps_the_first_root(listings in listings()) {
        let unit = merge(&listings, DuplicatesStrategy::Exclude).unwrap();
        for file in unit.files() {
            let first = listings
                .iter()
                .find(|l| l.files.contains(&file.relative))
                .unwrap();
            prop_assert_eq!(&file.root, &first.root);
        }
    }

    /// PROPERTY: `last_wins` is `exclude` over the reversed root order.
    #[test]
    fn property_last_wins_mirrors_exclude(listings in listings()) {
        let last = merge(&listings, DuplicatesStrategy::LastWins).unwrap();
        let reversed: Vec<RootListing> = listings.iter().rev().cloned().collect();
        let first = merge(&reversed, DuplicatesStrategy::Exclude).unwrap();

        let owners = |unit: &skein::domain::entities::MergedUnit| -> Vec<(PathBuf, PathBuf)> {
            unit.files().map(|f| (f.relative.clone(), f.root.clone())).collect()
        };
        prop_assert_eq!(owners(&last), owners(&first));
    }

    /// PROPERTY: the order files are listed in never changes the result.
    #[test]
    fn property_listing_order_is_irrelevant(listings in listings()) {
        let shuffled: Vec<RootListing> = listings
            .iter()
            .map(|l| {
                let mut files = l.files.clone();
                files.reverse();
                RootListing::new(l.root.clone(), l.base.clone(), files)
            })
            .collect();
        prop_assert_eq!(
            merge(&listings, DuplicatesStrategy::Warn).unwrap(),
            merge(&shuffled, DuplicatesStrategy::Warn).unwrap()
        );
    }

    /// PROPERTY: `fail` succeeds exactly when no two roots share a path.
    #[test]
    fn property_fail_rejects_any_overlap(listings in listings()) {
        let result = merge(&listings, DuplicatesStrategy::Fail);
        if has_overlap(&listings) {
            let is_conflict = matches!(result, Err(MergeError::Conflict { .. }));
            prop_assert!(is_conflict);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
