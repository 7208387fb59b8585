// tests/keys.rs
use cxr_prep::{DataError, ImageKey, Split, View};

#[test]
fn path_decodes_into_key() {
    let key = ImageKey::from_path("train/p1/s10/view1_frontal.jpg").unwrap();
    assert_eq!(
        key,
        ImageKey {
            split: Split::Train,
            patient_id: 1,
            study_id: 10,
            image_index: 1,
            view: View::Frontal,
        }
    );
}

#[test]
fn round_trip_key_to_path_to_key() {
    for split in Split::ALL {
        for view in View::ALL {
            let key = ImageKey {
                split,
                patient_id: 10_032_861,
                study_id: 5,
                image_index: 3,
                view,
            };
            assert_eq!(ImageKey::from_path(&key.to_path()).unwrap(), key);
        }
    }
}

#[test]
fn round_trip_path_to_key_to_path() {
    for path in [
        "train/p1/s10/view1_frontal.jpg",
        "valid/p999/s0/view0_lateral.jpg",
        "other/p42/s17/view2_other.jpg",
    ] {
        assert_eq!(ImageKey::from_path(path).unwrap().to_path(), path);
    }
}

#[test]
fn malformed_paths_are_rejected() {
    for path in [
        "",
        "train/p1/s10/view1_frontal",          // missing extension
        "train/p1/s10/view1_frontal.png",      // wrong extension
        "test/p1/s10/view1_frontal.jpg",       // unknown split
        "train/px/s10/view1_frontal.jpg",      // non-numeric patient
        "train/p1/s/view1_frontal.jpg",        // missing study digits
        "train/p1/s10/view1_oblique.jpg",      // unknown view
        "train/p1/view1_frontal.jpg",          // missing segment
        "train/p1/s10/view1_frontal.jpg/extra",
        "/train/p1/s10/view1_frontal.jpg",     // leading slash
        "TRAIN/p1/s10/view1_frontal.jpg",      // case matters
        "train/p99999999999999999999/s1/view1_frontal.jpg", // id overflow
    ] {
        let err = ImageKey::from_path(path).unwrap_err();
        assert_eq!(
            err,
            DataError::MalformedPath {
                path: path.to_string()
            },
            "expected rejection for {path:?}"
        );
    }
}

#[test]
fn decoding_is_idempotent() {
    let path = "valid/p7/s3/view2_lateral.jpg";
    let first = ImageKey::from_path(path).unwrap();
    let second = ImageKey::from_path(path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_path(), second.to_path());
}

#[test]
fn enumeration_codes_are_pinned() {
    // Versioned contract: changing these invalidates written artifacts.
    assert_eq!(Split::Train.code(), 0);
    assert_eq!(Split::Valid.code(), 1);
    assert_eq!(Split::Other.code(), 2);
    assert_eq!(View::Frontal.code(), 0);
    assert_eq!(View::Lateral.code(), 1);
    assert_eq!(View::Other.code(), 2);
}

#[test]
fn tokens_round_trip_through_enums() {
    for split in Split::ALL {
        assert_eq!(Split::from_token(split.token()), Some(split));
    }
    for view in View::ALL {
        assert_eq!(View::from_token(view.token()), Some(view));
    }
    assert_eq!(Split::from_token("frontal"), None);
    assert_eq!(View::from_token("train"), None);
}
