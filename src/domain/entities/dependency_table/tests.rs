use super::*;

fn dep(name: &str, coordinate: &str, scope: DependencyScope) -> Dependency {
    Dependency::new(name, coordinate.parse().unwrap(), scope)
}

fn bootcamp_table() -> DependencyTable {
    let mut table = DependencyTable::new();
    for d in [
        dep("starter", "org.springframework.boot:spring-boot-starter", DependencyScope::Compile),
        dep("web", "org.springframework.boot:spring-boot-starter-web", DependencyScope::Compile),
        dep("h2", "com.h2database:h2", DependencyScope::RuntimeOnly),
        dep(
            "starter-test",
            "org.springframework.boot:spring-boot-starter-test",
            DependencyScope::TestCompile,
        ),
        dep(
            "junit-launcher",
            "org.junit.platform:junit-platform-launcher",
            DependencyScope::TestRuntimeOnly,
        ),
    ] {
        table.register(d).unwrap();
    }
    table
}

fn names<'a>(it: impl Iterator<Item = &'a Dependency>) -> Vec<&'a str> {
    it.map(|d| d.name.as_str()).collect()
}

#[test]
fn resolve_yields_declaration_order() {
    let table = bootcamp_table();
    assert_eq!(names(table.resolve(DependencyScope::Compile)), vec!["starter", "web"]);
    assert_eq!(names(table.resolve(DependencyScope::RuntimeOnly)), vec!["h2"]);
}

#[test]
fn resolve_is_stable_across_runs() {
    let a = bootcamp_table();
    let b = bootcamp_table();
    for scope in DependencyScope::ALL {
        assert_eq!(names(a.resolve(scope)), names(b.resolve(scope)));
    }
}

#[test]
fn conflicting_versions_in_same_scope_are_rejected() {
    let mut table = DependencyTable::new();
    table
        .register(dep("h2", "com.h2database:h2:2.2.224", DependencyScope::RuntimeOnly))
        .unwrap();
    let err = table
        .register(dep("h2-new", "com.h2database:h2:2.3.232", DependencyScope::RuntimeOnly))
        .unwrap_err();
    assert!(matches!(err, DependencyTableError::DuplicateDependency { .. }));
}

#[test]
fn same_module_in_different_scopes_is_allowed() {
    let mut table = DependencyTable::new();
    table
        .register(dep("h2", "com.h2database:h2:2.2.224", DependencyScope::RuntimeOnly))
        .unwrap();
    let outcome = table
        .register(dep("h2-test", "com.h2database:h2:2.3.232", DependencyScope::TestCompile))
        .unwrap();
    assert_eq!(outcome, Registration::Added);
}

#[test]
fn identical_redeclaration_is_idempotent() {
    let mut table = DependencyTable::new();
    let d = dep(
        "web",
        "org.springframework.boot:spring-boot-starter-web",
        DependencyScope::Compile,
    );
    assert_eq!(table.register(d.clone()).unwrap(), Registration::Added);
    assert_eq!(table.register(d).unwrap(), Registration::AlreadyPresent);
    assert_eq!(table.len(), 1);
}

#[test]
fn reusing_a_name_for_another_coordinate_fails() {
    let mut table = DependencyTable::new();
    table
        .register(dep(
            "web",
            "org.springframework.boot:spring-boot-starter-web",
            DependencyScope::Compile,
        ))
        .unwrap();
    let err = table
        .register(dep(
            "web",
            "org.springframework.boot:spring-boot-starter-webflux",
            DependencyScope::Compile,
        ))
        .unwrap_err();
    assert!(matches!(err, DependencyTableError::NameConflict { .. }));
}

#[test]
fn empty_name_is_rejected() {
    let mut table = DependencyTable::new();
    let err = table
        .register(dep("  ", "com.h2database:h2", DependencyScope::RuntimeOnly))
        .unwrap_err();
    assert!(matches!(err, DependencyTableError::EmptyName { .. }));
}

#[test]
fn classpaths_compose_scopes() {
    let table = bootcamp_table();
    assert_eq!(
        names(table.classpath(ClasspathKind::MainCompile, None)),
        vec!["starter", "web"]
    );
    assert_eq!(
        names(table.classpath(ClasspathKind::MainRuntime, None)),
        vec!["starter", "web", "h2"]
    );
    assert_eq!(
        names(table.classpath(ClasspathKind::TestCompile, None)),
        vec!["starter", "web", "starter-test"]
    );
    assert_eq!(
        names(table.classpath(ClasspathKind::TestRuntime, None)),
        vec!["starter", "web", "h2", "starter-test", "junit-launcher"]
    );
}

#[test]
fn classpath_honours_subset() {
    let table = bootcamp_table();
    let subset = vec!["starter".to_string()];
    assert_eq!(
        names(table.classpath(ClasspathKind::MainRuntime, Some(&subset))),
        vec!["starter"]
    );
}

#[test]
fn classpath_deduplicates_modules_across_scopes() {
    let mut table = DependencyTable::new();
    table
        .register(dep("h2", "com.h2database:h2:2.2.224", DependencyScope::RuntimeOnly))
        .unwrap();
    table
        .register(dep("h2-test", "com.h2database:h2:2.3.232", DependencyScope::TestCompile))
        .unwrap();
    let cp: Vec<_> = table.classpath(ClasspathKind::TestRuntime, None).collect();
    assert_eq!(cp.len(), 1);
    assert_eq!(cp[0].name, "h2");
}
