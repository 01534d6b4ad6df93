use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SECRET: &str = "00112233445566778899aabbccddeeff";
const CREDENTIAL: &str = "abcdef1234567890";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self { dir: TempDir::new().expect("tempdir") };
        fixture.write_config("config.json", SECRET);
        fixture
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write_config(&self, name: &str, secret: &str) -> PathBuf {
        let path = self.root().join(name);
        let config = json!({
            "nfs_dir": self.root().join("nfs"),
            "local_dir": self.root().join("local"),
            "build_secret_hex": secret,
            "bind_attrs": ["hostname", "tpm"],
            "kdf": { "log_n": 10 }
        });
        fs::write(&path, config.to_string()).expect("write config");
        path
    }

    fn cmd_with(&self, config: &str) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("nodelock");
        cmd.env_remove("NODELOCK_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.root().join(config));
        cmd
    }

    fn cmd(&self) -> assert_cmd::Command {
        self.cmd_with("config.json")
    }

    fn provision(&self) {
        self.cmd()
            .args(["provision", "--stdin"])
            .write_stdin(format!("{CREDENTIAL}\n"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Provisioned 16 bytes"));
    }
}

#[test]
fn provision_enroll_recover() {
    let fx = Fixture::new();
    fx.provision();

    fx.cmd().arg("enroll").assert().success().stdout("Enrolled\n");
    fx.cmd().arg("enroll").assert().success().stdout("Already enrolled\n");

    fx.cmd()
        .args(["recover", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{CREDENTIAL}\n")));

    fx.cmd().arg("recover").assert().success().stdout("Recovered 16 bytes\n");
}

#[test]
fn credential_can_be_passed_as_argument() {
    let fx = Fixture::new();
    fx.cmd().args(["provision", "hunter22"]).assert().success();
    fx.cmd().arg("enroll").assert().success();
    fx.cmd().args(["recover", "--reveal"]).assert().success().stdout("hunter22\n");
}

#[test]
fn status_tracks_artifacts() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_part2.json   missing"))
        .stdout(predicate::str::contains("provisioned      no"));

    fx.provision();
    fx.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_part1.json   present"))
        .stdout(predicate::str::contains("local_key.json   missing"))
        .stdout(predicate::str::contains("enrolled         no"));
}

#[test]
fn probe_lists_bound_attributes() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostname"))
        .stdout(predicate::str::contains("tpm"));
}

#[test]
fn missing_config_is_a_configuration_error() {
    let fx = Fixture::new();
    fx.cmd_with("absent.json").arg("status").assert().code(2);
}

#[test]
fn empty_stdin_is_rejected() {
    let fx = Fixture::new();
    fx.cmd().args(["provision", "--stdin"]).write_stdin("  \n").assert().code(2);
    assert!(!fx.root().join("nfs").join("api_part2.json").exists());
}

#[test]
fn workflow_errors_map_to_exit_codes() {
    let fx = Fixture::new();

    fx.cmd().arg("enroll").assert().code(3);
    fx.cmd().arg("recover").assert().code(4).stderr(predicate::str::contains("Not enrolled"));

    fx.provision();
    fx.cmd().arg("recover").assert().code(4);
}

#[test]
fn wrong_build_secret_is_a_secret_mismatch() {
    let fx = Fixture::new();
    fx.provision();
    fx.write_config("other.json", "ffeeddccbbaa99887766554433221100");

    fx.cmd_with("other.json").arg("enroll").assert().code(6);
}

#[test]
fn recovered_credential_is_not_printed_without_reveal() {
    let fx = Fixture::new();
    fx.provision();
    fx.cmd().arg("enroll").assert().success();
    fx.cmd().arg("recover").assert().success().stdout(predicate::str::contains(CREDENTIAL).not());
}
