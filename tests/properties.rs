//! Property tests for version classification and settings merge.

use proptest::prelude::*;
use serde_json::{json, Value};

use dotship::domain::value_objects::{BuildConfiguration, ProjectVersion};
use dotship::infrastructure::config::layers::merge;

fn core() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..1000, 1..=4).prop_map(|parts| {
        parts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

proptest! {
    #[test]
    fn plain_versions_are_release(core in core(), metadata in "[a-z0-9]{0,8}") {
        let raw = if metadata.is_empty() { core } else { format!("{core}+{metadata}") };
        let version = ProjectVersion::parse(&raw).unwrap();
        prop_assert!(!version.is_prerelease());
        prop_assert_eq!(version.build_configuration(), BuildConfiguration::Release);
    }

    #[test]
    fn alphabetic_qualifier_is_prerelease(
        core in core(),
        label in "[a-z]{1,8}",
        number in proptest::option::of(0u32..100),
    ) {
        let qualifier = match number {
            Some(n) => format!("{label}.{n}"),
            None => label,
        };
        let version = ProjectVersion::parse(&format!("{core}-{qualifier}")).unwrap();
        prop_assert!(version.is_prerelease());
        prop_assert_eq!(version.build_configuration(), BuildConfiguration::Debug);
        prop_assert_eq!(version.qualifier(), Some(qualifier.as_str()));
    }

    #[test]
    fn numeric_qualifier_is_release(core in core(), n in 0u32..10_000) {
        let version = ProjectVersion::parse(&format!("{core}-{n}")).unwrap();
        prop_assert!(!version.is_prerelease());
    }

    #[test]
    fn later_layer_wins_for_every_key(
        base in prop::collection::btree_map("[A-Za-z]{1,6}", 0i64..100, 0..6),
        overlay in prop::collection::btree_map("[a-z]{1,6}", 0i64..100, 0..6),
    ) {
        let mut merged = json!({ "Dotship": base.clone() });
        merge(&mut merged, json!({ "Dotship": overlay.clone() }));
        let section = merged["Dotship"].as_object().unwrap();

        for (key, value) in &overlay {
            let found = section
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.clone());
            prop_assert_eq!(found, Some(Value::from(*value)));
        }
        for key in base.keys() {
            prop_assert!(section.keys().any(|k| k.eq_ignore_ascii_case(key)));
        }
    }

    #[test]
    fn merging_an_empty_layer_changes_nothing(
        base in prop::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..6),
    ) {
        let original = json!({ "Dotship": { "Linux": base } });
        let mut merged = original.clone();
        merge(&mut merged, json!({}));
        prop_assert_eq!(merged, original);
    }
}
