use proptest::prelude::*;
use std::fs;
use wfpack_guard::AllowedRoots;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn relative_paths_without_parent_hops_stay_inside(parts in prop::collection::vec(segment(), 1..5)) {
        let dir = tempfile::tempdir().unwrap();
        let roots = AllowedRoots::new(dir.path());

        let raw = parts.join("/");
        prop_assert!(roots.is_allowed(&raw));
        let quoted = format!("  \"{raw}\"  ");
        prop_assert!(roots.is_allowed(&quoted));
    }

    #[test]
    fn climbing_past_base_is_rejected(parts in prop::collection::vec(segment(), 0..4)) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("install");
        fs::create_dir_all(&base).unwrap();
        let roots = AllowedRoots::new(&base);

        // Every segment is undone, then one more hop leaves the base.
        let mut raw: Vec<String> = parts.clone();
        raw.extend(std::iter::repeat("..".to_string()).take(parts.len() + 1));
        raw.push("outside".to_string());

        prop_assert!(!roots.is_allowed(&raw.join("/")));
    }
}

#[test]
fn extra_root_allows_absolute_destination() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("install");
    let drive = dir.path().join("drive");
    fs::create_dir_all(&base).unwrap();
    fs::create_dir_all(&drive).unwrap();

    let roots = AllowedRoots::new(&base).with_root(&drive);

    let destination = drive.join("backups").join("2026");
    assert!(roots.is_allowed(destination.to_str().unwrap()));
    assert!(!AllowedRoots::new(&base).is_allowed(destination.to_str().unwrap()));
}
