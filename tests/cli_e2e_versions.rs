//! End-to-end tests for the commands that rewrite descriptors:
//! `release`, `snapshot` and `classifier`.

mod common;
use common::prelude::*;

#[test]
fn test_release_rewrites_every_module() {
    let fixture = TestFixture::new().with_multi_module_build();

    let mut cmd = cargo_bin_cmd!("pomtree");
    cmd.current_dir(fixture.path())
        .arg("release")
        .assert()
        .success()
        .stdout(predicate::str::contains("Released 3 project(s)"))
        .stdout(predicate::str::contains("Saved 3 descriptor(s)"));

    assert!(fixture.read("pom.xml").contains("<version>1.2.3</version>"));
    assert!(fixture
        .read("pom.xml")
        .contains("<!-- release train parent -->"));
    assert!(!fixture.read("core/pom.xml").contains("SNAPSHOT"));
    assert!(!fixture.read("app/pom.xml").contains("SNAPSHOT"));
}

#[test]
fn test_release_with_qualifier() {
    let fixture = TestFixture::new().with_multi_module_build();

    let mut cmd = cargo_bin_cmd!("pomtree");
    cmd.current_dir(fixture.path())
        .arg("release")
        .arg("--qualifier")
        .arg("rc1")
        .assert()
        .success();

    assert!(fixture
        .read("core/pom.xml")
        .contains("<version>1.2.3-rc1</version>"));
}

#[test]
fn test_release_dry_run_writes_nothing() {
    let fixture = TestFixture::new().with_multi_module_build();

    let mut cmd = cargo_bin_cmd!("pomtree");
    cmd.current_dir(fixture.path())
        .arg("release")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update"))
        .stdout(predicate::str::contains("3 descriptor(s) would change"));

    assert_eq!(fixture.read("pom.xml"), poms::ROOT);
    assert_eq!(fixture.read("core/pom.xml"), poms::CORE);
}

#[test]
fn test_snapshot_after_release() {
    let fixture = TestFixture::new().with_multi_module_build();

    cargo_bin_cmd!("pomtree")
        .current_dir(fixture.path())
        .arg("release")
        .assert()
        .success();
    cargo_bin_cmd!("pomtree")
        .current_dir(fixture.path())
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 3 project(s)"));

    assert!(fixture
        .read("pom.xml")
        .contains("<version>1.3.0-SNAPSHOT</version>"));
    assert!(fixture
        .read("app/pom.xml")
        .contains("<version>1.3.0-SNAPSHOT</version>"));
}

#[test]
fn test_classifier_substitution() {
    let fixture = TestFixture::new().with_multi_module_build();

    let mut cmd = cargo_bin_cmd!("pomtree");
    cmd.current_dir(fixture.path())
        .arg("classifier")
        .arg("--property")
        .arg("env")
        .arg("--value")
        .arg("prod")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced ${env} in 1 classifier(s)"));

    assert!(fixture
        .read("app/pom.xml")
        .contains("<classifier>native-prod</classifier>"));
}

#[test]
fn test_classifier_requires_value() {
    let mut cmd = cargo_bin_cmd!("pomtree");
    cmd.arg("classifier")
        .arg("--property")
        .arg("env")
        .assert()
        .code(2);
}
