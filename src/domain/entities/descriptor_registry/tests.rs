use super::*;
use crate::domain::entities::Dependency;
use crate::domain::value_objects::DependencyScope;

const WEB_MAIN: &str = "com.wcc.bootcamp.java.mentorship.MentorshipWebApplication";
const MATCHER_MAIN: &str = "com.wcc.bootcamp.java.mentorship.MentorshipMatcherApp";

fn app(name: &str, main: &str) -> ApplicationDescriptor {
    ApplicationDescriptor::new(name, main.parse().unwrap())
}

#[test]
fn list_preserves_registration_order() {
    let mut registry = DescriptorRegistry::new();
    registry.register(app("web", WEB_MAIN)).unwrap();
    registry.register(app("matcher", MATCHER_MAIN)).unwrap();
    assert_eq!(registry.list(), vec!["web", "matcher"]);
}

#[test]
fn same_entry_point_twice_is_rejected() {
    let mut registry = DescriptorRegistry::new();
    registry.register(app("web", WEB_MAIN)).unwrap();
    let err = registry.register(app("web2", WEB_MAIN)).unwrap_err();
    match err {
        RegistryError::DuplicateEntryPoint {
            existing, incoming, ..
        } => {
            assert_eq!(existing, "web");
            assert_eq!(incoming, "web2");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn same_name_twice_is_rejected() {
    let mut registry = DescriptorRegistry::new();
    registry.register(app("web", WEB_MAIN)).unwrap();
    let err = registry.register(app("web", MATCHER_MAIN)).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }));
}

#[test]
fn names_with_path_separators_are_rejected() {
    let mut registry = DescriptorRegistry::new();
    let err = registry.register(app("../web", WEB_MAIN)).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidName { .. }));
}

#[test]
fn require_lists_known_applications() {
    let mut registry = DescriptorRegistry::new();
    registry.register(app("web", WEB_MAIN)).unwrap();
    let err = registry.require("nope").unwrap_err();
    assert_eq!(err.to_string(), "unknown application 'nope' (known: web)");
}

#[test]
fn undeclared_dependency_subset_fails_validation() {
    let mut table = DependencyTable::new();
    table
        .register(Dependency::new(
            "starter",
            "org.springframework.boot:spring-boot-starter".parse().unwrap(),
            DependencyScope::Compile,
        ))
        .unwrap();

    let mut registry = DescriptorRegistry::new();
    registry
        .register(
            app("matcher", MATCHER_MAIN)
                .with_dependencies(Some(vec!["starter".into(), "jpa".into()])),
        )
        .unwrap();

    let err = registry.validate_dependencies(&table).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownDependency {
            application: "matcher".into(),
            dependency: "jpa".into(),
        }
    );
}
