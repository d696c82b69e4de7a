//! Behaviour-driven tests for distribution detachment.
//!
//! These scenarios drive `detach_distributions` against real files in a
//! temporary build directory and inspect the project and the staged output.
//! Tests use the rstest-bdd v0.5.0 mutable world pattern.

use camino::Utf8PathBuf;
use commons_release::digest::sha512_file;
use commons_release::{
    Artifact, DetachOutcome, Project, ReleaseError, SkipReason, StagingConfig,
    detach_distributions,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

struct DetachWorld {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
    config: StagingConfig,
    project: Project,
    outcome: Option<DetachOutcome>,
    error: Option<ReleaseError>,
    read_only: bool,
}

#[fixture]
fn world() -> DetachWorld {
    let temp_dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("utf-8 temp dir");
    let target = root.join("target");
    fs::create_dir_all(&target).expect("mkdir target");
    DetachWorld {
        _temp_dir: temp_dir,
        root,
        config: StagingConfig::default(),
        project: Project::new(target, Vec::new()),
        outcome: None,
        error: None,
        read_only: false,
    }
}

impl DetachWorld {
    fn working_directory(&self) -> Utf8PathBuf {
        self.config.working_directory_for(&self.project)
    }

    fn attach(&mut self, name: &str, artifact_type: &str) -> Utf8PathBuf {
        let file = self.project.build_directory.join(name);
        self.project.attached_artifacts.push(Artifact {
            group_id: "org.apache.commons".to_owned(),
            artifact_id: "lib".to_owned(),
            version: "1.0".to_owned(),
            classifier: None,
            artifact_type: artifact_type.to_owned(),
            file: file.clone(),
        });
        file
    }

    fn attached_names(&self) -> Vec<String> {
        self.project
            .attached_artifacts()
            .iter()
            .filter_map(|a| a.file_name().map(str::to_owned))
            .collect()
    }

    /// Root bypasses directory permissions, so read-only checks are moot.
    fn permissions_enforced(&self) -> bool {
        #[cfg(unix)]
        {
            !self.read_only || unsafe { libc::geteuid() } != 0
        }
        #[cfg(not(unix))]
        {
            !self.read_only
        }
    }
}

fn staging_url() -> String {
    "scm:svn:https://dist.apache.org/repos/dist/dev/commons/lib".to_owned()
}

fn split_names(names: &str) -> Vec<String> {
    names.split(',').map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a distribution module with a staging URL")]
fn given_dist_module(world: &mut DetachWorld) {
    world.config.is_dist_module = true;
    world.config.dist_svn_staging_url = staging_url();
}

#[given("a module that is not a distribution module")]
fn given_non_dist_module(world: &mut DetachWorld) {
    world.config.is_dist_module = false;
    world.config.dist_svn_staging_url = staging_url();
}

#[given("a distribution module without a staging URL")]
fn given_dist_module_without_url(world: &mut DetachWorld) {
    world.config.is_dist_module = true;
    world.config.dist_svn_staging_url = String::new();
}

#[given("an attached artifact \"{name}\" of type \"{artifact_type}\"")]
fn given_attached_artifact(world: &mut DetachWorld, name: String, artifact_type: String) {
    let file = world.attach(&name, &artifact_type);
    fs::write(&file, format!("contents of {name}")).expect("write artifact");
}

#[given("a missing attached artifact \"{name}\" of type \"{artifact_type}\"")]
fn given_missing_artifact(world: &mut DetachWorld, name: String, artifact_type: String) {
    world.attach(&name, &artifact_type);
}

#[given("a read-only working directory")]
fn given_read_only_working_directory(world: &mut DetachWorld) {
    let dir = world.root.join("read-only");
    fs::create_dir_all(&dir).expect("mkdir");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).expect("chmod");
    }
    world.config.working_directory = Some(dir);
    world.read_only = true;
}

#[when("the distributions are detached")]
fn when_detached(world: &mut DetachWorld) {
    let config = world.config.clone();
    match detach_distributions(&mut world.project, &config) {
        Ok(outcome) => world.outcome = Some(outcome),
        Err(e) => world.error = Some(e),
    }
}

#[then("the attached artifacts are \"{names}\"")]
fn then_attached_artifacts(world: &mut DetachWorld, names: String) {
    assert_eq!(world.attached_names(), split_names(&names));
}

#[then("the manifest lists \"{names}\"")]
fn then_manifest_lists(world: &mut DetachWorld, names: String) {
    let manifest = world.working_directory().join("sha512.properties");
    let text = fs::read_to_string(manifest).expect("read manifest");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("#Release SHA-512s"));
    let keys: Vec<String> = lines
        .map(|line| line.split_once('=').expect("key=value line").0.to_owned())
        .collect();
    assert_eq!(keys, split_names(&names));
}

#[then("the working directory contains \"{name}\"")]
fn then_working_directory_contains(world: &mut DetachWorld, name: String) {
    assert!(
        world.working_directory().join(&name).is_file(),
        "expected {name} in the working directory"
    );
}

#[then("the working directory lacks \"{name}\"")]
fn then_working_directory_lacks(world: &mut DetachWorld, name: String) {
    assert!(
        !world.working_directory().join(&name).exists(),
        "did not expect {name} in the working directory"
    );
}

#[then("the working directory does not exist")]
fn then_no_working_directory(world: &mut DetachWorld) {
    assert!(!world.working_directory().exists());
}

#[then("every sidecar holds its artifact's digest")]
fn then_sidecars_hold_digests(world: &mut DetachWorld) {
    let Some(DetachOutcome::Staged(report)) = &world.outcome else {
        panic!("expected a staged outcome, got {:?}", world.outcome);
    };
    assert_eq!(report.digest_files.len(), report.detached.len());
    for artifact in &report.detached {
        let name = artifact.file_name().expect("file name");
        let sidecar = report.working_directory.join(format!("{name}.sha512"));
        let expected = sha512_file(&artifact.file).expect("hash original");
        assert_eq!(
            fs::read_to_string(sidecar).expect("read sidecar"),
            format!("{expected}\n")
        );
    }
}

#[then("the run is skipped because \"{reason}\"")]
fn then_skipped(world: &mut DetachWorld, reason: String) {
    let expected = match reason.as_str() {
        "not a distribution module" => SkipReason::NotDistModule,
        "staging URL unset" => SkipReason::StagingUrlUnset,
        "no distributions" => SkipReason::NoDistributions,
        other => panic!("unknown skip reason {other}"),
    };
    assert_eq!(world.outcome, Some(DetachOutcome::Skipped(expected)));
}

#[then("the run fails naming \"{artifact}\"")]
fn then_fails_naming(world: &mut DetachWorld, artifact: String) {
    match world.error.as_ref() {
        Some(ReleaseError::ArtifactDigest { artifact: named, .. }) => assert_eq!(named, &artifact),
        other => panic!("expected ArtifactDigest error, got {other:?}"),
    }
}

#[then("the run fails to write the manifest")]
fn then_fails_writing_manifest(world: &mut DetachWorld) {
    if !world.permissions_enforced() {
        return;
    }
    assert!(
        matches!(world.error, Some(ReleaseError::PropertiesWrite { .. })),
        "expected PropertiesWrite error, got {:?}",
        world.error
    );
    assert!(
        world.attached_names().is_empty(),
        "detached artifacts stay detached after a failure"
    );
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Source archive and signature are detached and staged"
)]
fn scenario_detach_and_stage(world: DetachWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Manifest order does not depend on attachment order"
)]
fn scenario_manifest_order(world: DetachWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Non-distribution modules are left alone"
)]
fn scenario_non_dist_module(world: DetachWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Missing staging URL skips the run"
)]
fn scenario_missing_url(world: DetachWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Projects without distributions are not staged"
)]
fn scenario_no_distributions(world: DetachWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Unreadable artifact fails the run"
)]
fn scenario_unreadable_artifact(world: DetachWorld) {
    let _ = world;
}

#[cfg(unix)]
#[scenario(
    path = "tests/features/detach_distributions.feature",
    name = "Read-only working directory fails the run"
)]
fn scenario_read_only_working_directory(world: DetachWorld) {
    let _ = world;
}
