//! Properties of the dependency table's ordering.

use proptest::prelude::*;

use skein::domain::entities::{Dependency, DependencyTable};
use skein::domain::value_objects::{ClasspathKind, Coordinate, DependencyScope};

fn scope() -> impl Strategy<Value = DependencyScope> {
    prop_oneof![
        Just(DependencyScope::Compile),
        Just(DependencyScope::RuntimeOnly),
        Just(DependencyScope::TestCompile),
        Just(DependencyScope::TestRuntimeOnly),
    ]
}

/// Declarations with unique names and unique artifacts
fn declarations() -> impl Strategy<Value = Vec<Dependency>> {
    proptest::collection::vec(scope(), 0..12).prop_map(|scopes| {
        scopes
            .into_iter()
            .enumerate()
            .map(|(i, scope)| {
                let coordinate =
                    Coordinate::new("org.example", format!("lib{}", i), Some("1.0".into()));
                Dependency::new(format!("dep{}", i), coordinate, scope)
            })
            .collect()
    })
}

fn table(declarations: &[Dependency]) -> DependencyTable {
    let mut table = DependencyTable::new();
    for dependency in declarations {
        table.register(dependency.clone()).unwrap();
    }
    table
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: each scope yields its declarations in declaration order.
    #[test]
    fn property_resolve_keeps_declaration_order(declarations in declarations(), wanted in scope()) {
        let table = table(&declarations);
        let resolved: Vec<&str> = table.resolve(wanted).map(|d| d.name.as_str()).collect();
        let expected: Vec<&str> = declarations
            .iter()
            .filter(|d| d.scope == wanted)
            .map(|d| d.name.as_str())
            .collect();
        prop_assert_eq!(resolved, expected);
    }

    /// PROPERTY: the test runtime classpath is a superset of main runtime, in the same relative order.
    #[test]
    fn property_test_runtime_extends_main_runtime(declarations in declarations()) {
        let table = table(&declarations);
        let main: Vec<&str> = table
            .classpath(ClasspathKind::MainRuntime, None)
            .map(|d| d.name.as_str())
            .collect();
        let test: Vec<&str> = table
            .classpath(ClasspathKind::TestRuntime, None)
            .map(|d| d.name.as_str())
            .filter(|name| main.contains(name))
            .collect();
        prop_assert_eq!(test, main);
    }

    /// PROPERTY: re-registering an identical declaration changes nothing.
    #[test]
    fn property_identical_registration_is_idempotent(declarations in declarations()) {
        let mut table = table(&declarations);
        let before = table.clone();
        for dependency in &declarations {
            table.register(dependency.clone()).unwrap();
        }
        prop_assert_eq!(table, before);
    }
}
