//! Parsing properties for user-supplied strings.

use proptest::prelude::*;

use skein::domain::value_objects::{Coordinate, EntryPoint};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: coordinate parsing never panics.
    #[test]
    fn property_coordinate_parse_never_panics(s in "(?s).{0,128}") {
        let _ = s.parse::<Coordinate>();
    }

    /// PROPERTY: a well-formed coordinate prints back to its input.
    #[test]
    fn property_coordinate_display_matches_input(
        group in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}",
        artifact in "[a-z][a-z0-9-]{0,15}",
        version in proptest::option::of("[0-9]{1,2}\\.[0-9]{1,2}(\\.[0-9]{1,2})?"),
    ) {
        let input = match &version {
            Some(v) => format!("{}:{}:{}", group, artifact, v),
            None => format!("{}:{}", group, artifact),
        };
        let coordinate: Coordinate = input.parse().unwrap();
        prop_assert_eq!(coordinate.to_string(), input);
        prop_assert_eq!(coordinate.version(), version.as_deref());
    }

    /// PROPERTY: an entry point maps to one relative source path per extension.
    #[test]
    fn property_entry_point_maps_to_package_path(
        package in proptest::collection::vec("[a-z][a-z0-9]{0,6}", 0..4),
        class in "[A-Z][A-Za-z0-9]{0,10}",
    ) {
        let mut segments = package.clone();
        segments.push(class.clone());
        let entry_point: EntryPoint = segments.join(".").parse().unwrap();

        let candidates = entry_point.source_candidates(&["java".to_string()]);
        let mut expected: std::path::PathBuf = package.iter().collect();
        expected.push(format!("{}.java", class));
        prop_assert_eq!(candidates, vec![expected]);
        prop_assert_eq!(entry_point.simple_name(), class.as_str());
    }
}
