//! Reusable project content.

use std::path::Path;

use super::TestProject;

pub const PACKAGE_DIR: &str = "com/wcc/bootcamp/java/mentorship";

/// Two applications over two main roots, with a duplicated `Mentor.java`.
pub const BOOTCAMP_TOML: &str = r#"
[project]
group = "com.wcc.bootcamp.java"
version = "0.0.1-SNAPSHOT"

[toolchain]
version = 21
homes = ["jdk"]

[repository]
local = "repo"
remotes = []

[managed_versions]
"org.springframework.boot:spring-boot-starter" = "3.3.4"

[[dependency]]
name = "starter"
coordinate = "org.springframework.boot:spring-boot-starter"

[[dependency]]
name = "web"
coordinate = "org.springframework.boot:spring-boot-starter-web:3.3.4"

[source_sets.main]
sources = ["src/main/java", "participants/victoria/project/src/main/java"]

[[application]]
name = "web"
entry_point = "com.wcc.bootcamp.java.mentorship.MentorshipWebApplication"

[[application]]
name = "matcher"
entry_point = "com.wcc.bootcamp.java.mentorship.MentorshipMatcherApp"
dependencies = ["starter"]
"#;

pub const JARS: &[(&str, &str, &str)] = &[
    ("org.springframework.boot", "spring-boot-starter", "3.3.4"),
    ("org.springframework.boot", "spring-boot-starter-web", "3.3.4"),
];

fn java_class(name: &str, body: &str) -> String {
    format!(
        "package com.wcc.bootcamp.java.mentorship;\n\npublic class {} {{\n{}}}\n",
        name, body
    )
}

fn main_class(name: &str) -> String {
    java_class(
        name,
        "    public static void main(String[] args) {\n        System.out.println(\"hello\");\n    }\n",
    )
}

/// Project file and sources, without a JDK or repository
pub fn bootcamp_sources(project: &TestProject) {
    project.write("skein.toml", BOOTCAMP_TOML);
    project.write(
        &format!("src/main/java/{}/MentorshipWebApplication.java", PACKAGE_DIR),
        &main_class("MentorshipWebApplication"),
    );
    project.write(
        &format!("src/main/java/{}/Mentor.java", PACKAGE_DIR),
        &java_class("Mentor", ""),
    );
    project.write(
        &format!(
            "participants/victoria/project/src/main/java/{}/MentorshipMatcherApp.java",
            PACKAGE_DIR
        ),
        &main_class("MentorshipMatcherApp"),
    );
    project.write(
        &format!("participants/victoria/project/src/main/java/{}/Mentor.java", PACKAGE_DIR),
        &java_class("Mentor", "    // participant copy\n"),
    );
}

/// The full bootcamp project: sources, a JDK 21 home and the repository jars
pub fn bootcamp(project: &TestProject) {
    bootcamp_sources(project);
    fake_jdk(&project.path("jdk"), 21);
    fake_repo(&project.path("repo"));
}

/// A JDK home that satisfies discovery; its tools are empty files.
pub fn fake_jdk(home: &Path, version: u32) {
    let bin = home.join("bin");
    std::fs::create_dir_all(&bin).expect("create jdk bin");
    for tool in ["javac", "java"] {
        std::fs::write(bin.join(tool), "").expect("write jdk tool");
    }
    std::fs::write(
        home.join("release"),
        format!("IMPLEMENTOR=\"Test\"\nJAVA_VERSION=\"{}\"\n", version),
    )
    .expect("write release file");
}

/// Maven-layout jars for every entry in `JARS`
pub fn fake_repo(root: &Path) {
    for (group, artifact, version) in JARS {
        let mut dir = root.to_path_buf();
        for segment in group.split('.') {
            dir.push(segment);
        }
        dir.push(artifact);
        dir.push(version);
        std::fs::create_dir_all(&dir).expect("create repository directory");
        std::fs::write(dir.join(format!("{}-{}.jar", artifact, version)), b"PK\x03\x04")
            .expect("write jar");
    }
}

/// Replace the JDK tools with shell scripts: `javac` touches one class file
/// per source, `java` echoes its arguments and exits with `java_status`.
#[cfg(unix)]
pub fn scripted_jdk(home: &Path, java_status: i32) {
    use std::os::unix::fs::PermissionsExt;

    let javac = r#"#!/bin/sh
out=""
argfile=""
while [ $# -gt 0 ]; do
  case "$1" in
    -d) out="$2"; shift 2 ;;
    @*) argfile="${1#@}"; shift ;;
    *) shift ;;
  esac
done
mkdir -p "$out"
while IFS= read -r line; do
  src=$(printf '%s' "$line" | tr -d '"')
  touch "$out/$(basename "$src" .java).class"
done < "$argfile"
"#;
    let java = format!("#!/bin/sh\necho \"$@\"\nexit {}\n", java_status);

    for (tool, script) in [("javac", javac.to_string()), ("java", java)] {
        let path = home.join("bin").join(tool);
        std::fs::write(&path, script).expect("write tool script");
        let mut perms = std::fs::metadata(&path).expect("stat tool").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod tool");
    }
}
