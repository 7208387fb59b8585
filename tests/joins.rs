// tests/joins.rs
use cxr_prep::testing::sample_key;
use cxr_prep::{
    DataError, ImageKey, LabelCode, LabelVector, Split, View, cogroup, partition_by_view,
};
use std::collections::HashSet;

fn labels() -> LabelVector {
    LabelVector::new(vec![LabelCode::NotMentioned; 14])
}

fn key(patient_id: u64, view: View) -> ImageKey {
    ImageKey {
        split: Split::Train,
        patient_id,
        study_id: 1,
        image_index: 1,
        view,
    }
}

#[test]
fn one_to_one_join_succeeds() {
    let k = sample_key();
    let groups = cogroup(vec![(k, b"jpg".to_vec())], vec![(k, labels())]);
    assert_eq!(groups.len(), 1);

    let (jpg, row) = groups.into_values().next().unwrap().into_pair(&k).unwrap();
    assert_eq!(jpg, b"jpg".to_vec());
    assert_eq!(row, labels());
}

#[test]
fn duplicate_image_fails_with_observed_counts() {
    let k = sample_key();
    let groups = cogroup(
        vec![(k, b"a".to_vec()), (k, b"b".to_vec())],
        vec![(k, labels())],
    );
    let err = groups.into_values().next().unwrap().into_pair(&k).unwrap_err();
    assert_eq!(
        err,
        DataError::JoinCardinality {
            key: k,
            jpgs: 2,
            rows: 1
        }
    );
}

#[test]
fn missing_image_fails_with_zero_count() {
    let k = sample_key();
    let groups = cogroup(vec![], vec![(k, labels())]);
    let err = groups.into_values().next().unwrap().into_pair(&k).unwrap_err();
    assert_eq!(
        err,
        DataError::JoinCardinality {
            key: k,
            jpgs: 0,
            rows: 1
        }
    );
}

#[test]
fn missing_and_duplicate_labels_fail() {
    let k = sample_key();

    let groups = cogroup(vec![(k, b"jpg".to_vec())], vec![]);
    let err = groups.into_values().next().unwrap().into_pair(&k).unwrap_err();
    assert_eq!(
        err,
        DataError::JoinCardinality {
            key: k,
            jpgs: 1,
            rows: 0
        }
    );

    let groups = cogroup(vec![(k, b"jpg".to_vec())], vec![(k, labels()), (k, labels())]);
    let err = groups.into_values().next().unwrap().into_pair(&k).unwrap_err();
    assert_eq!(
        err,
        DataError::JoinCardinality {
            key: k,
            jpgs: 1,
            rows: 2
        }
    );
}

#[test]
fn grouping_ignores_arrival_order() {
    let a = key(1, View::Frontal);
    let b = key(2, View::Lateral);
    let images = vec![(b, b"b".to_vec()), (a, b"a".to_vec())];
    let rows = vec![(a, labels()), (b, labels())];

    let forward = cogroup(images.clone(), rows.clone());
    let reversed = cogroup(
        images.into_iter().rev().collect(),
        rows.into_iter().rev().collect(),
    );

    for k in [a, b] {
        assert_eq!(forward[&k].jpgs, reversed[&k].jpgs);
        assert_eq!(forward[&k].rows, reversed[&k].rows);
    }
}

#[test]
fn partitions_are_total_and_disjoint() {
    let keys: Vec<ImageKey> = (0..6)
        .map(|i| key(i, View::ALL[(i % 3) as usize]))
        .collect();
    let images = keys.iter().map(|&k| (k, b"x".to_vec())).collect();
    let rows = keys.iter().map(|&k| (k, labels())).collect();

    let parts = partition_by_view(cogroup(images, rows));
    assert_eq!(parts.len(), View::ALL.len());

    let mut seen = HashSet::new();
    for (i, part) in parts.iter().enumerate() {
        for (k, _) in part {
            assert_eq!(usize::from(k.view.code()), i, "key routed to wrong slot");
            assert!(seen.insert(*k), "key {k} appeared in two partitions");
        }
    }
    assert_eq!(seen, keys.into_iter().collect::<HashSet<_>>());
}

#[test]
fn failed_key_does_not_poison_other_keys() {
    let good = key(1, View::Frontal);
    let bad = key(2, View::Frontal);
    let groups = cogroup(
        vec![(good, b"g".to_vec())],
        vec![(good, labels()), (bad, labels())],
    );

    let mut results: Vec<(ImageKey, Result<_, DataError>)> = groups
        .into_iter()
        .map(|(k, group)| (k, group.into_pair(&k)))
        .collect();
    results.sort_by_key(|(k, _)| k.patient_id);

    assert!(results[0].1.is_ok());
    assert_eq!(
        results[1].1.clone().unwrap_err(),
        DataError::JoinCardinality {
            key: bad,
            jpgs: 0,
            rows: 1
        }
    );
}
