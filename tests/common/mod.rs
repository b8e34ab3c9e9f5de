//! Common test utilities for hostprep integration tests
//!
//! Provisioning is exercised against stub host tools: each stub is a tiny
//! shell script on a private PATH that appends its own invocation to a
//! shared log, so tests can assert exactly which commands ran and in what
//! order, without touching the real package manager or the network.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A test application directory plus a stub tool PATH
pub struct TestApp {
    /// Temporary directory backing everything
    pub temp: TempDir,
    /// Application root (holds requirements.txt, venv, hostprep.yaml)
    pub app_dir: PathBuf,
    /// Directory of stub host tools, placed first on PATH
    pub stub_dir: PathBuf,
    /// Invocation log appended to by every stub
    pub log: PathBuf,
}

fn write_executable(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("Failed to write stub");
    let mut perms = std::fs::metadata(path)
        .expect("Failed to stat stub")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("Failed to chmod stub");
}

impl TestApp {
    /// Create a new test app with a default dependency manifest
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let app_dir = temp.path().join("app");
        let stub_dir = temp.path().join("stubs");
        std::fs::create_dir_all(&app_dir).expect("Failed to create app dir");
        std::fs::create_dir_all(&stub_dir).expect("Failed to create stub dir");

        let log = temp.path().join("invocations.log");
        std::fs::write(&log, "").expect("Failed to create log");

        let app = Self {
            temp,
            app_dir,
            stub_dir,
            log,
        };
        app.write_file("requirements.txt", "fastapi\nuvicorn\nselenium\nrequests\n");
        app
    }

    /// Write a file under the app dir
    pub fn write_file(&self, path: &str, content: &str) {
        std::fs::write(self.app_dir.join(path), content).expect("Failed to write file");
    }

    /// Point the browser fallback's sources list into the temp dir
    pub fn redirect_sources_list(&self) -> PathBuf {
        let sources = self.temp.path().join("google-chrome.list");
        self.write_file(
            "hostprep.yaml",
            &format!("browser:\n  sources_list: {}\n", sources.display()),
        );
        sources
    }

    /// Install a stub tool that logs its invocation and succeeds
    pub fn stub(&self, name: &str) {
        self.stub_with_exit(name, 0);
    }

    /// Install a stub tool that logs its invocation and fails
    pub fn stub_failing(&self, name: &str) {
        self.stub_with_exit(name, 1);
    }

    fn stub_with_exit(&self, name: &str, code: i32) {
        let script = format!(
            "#!/bin/sh\nPATH=/usr/bin:/bin:$PATH\necho \"{name} $@\" >> {log}\nexit {code}\n",
            log = self.log.display(),
        );
        write_executable(&self.stub_dir.join(name), &script);
    }

    /// Install a wget stub that logs, creates the `-O` target, and succeeds.
    /// With `fail_resumable`, calls carrying `-c` (the primary, resumable
    /// download) fail instead, simulating an unreachable vendor host.
    pub fn stub_wget(&self, fail_resumable: bool) {
        let fail_branch = if fail_resumable {
            "case \" $* \" in *\" -c \"*) exit 1;; esac\n"
        } else {
            ""
        };
        let script = format!(
            "#!/bin/sh\n\
             PATH=/usr/bin:/bin:$PATH\n\
             echo \"wget $@\" >> {log}\n\
             {fail_branch}\
             prev=\"\"\n\
             for a in \"$@\"; do\n\
             \tif [ \"$prev\" = \"-O\" ]; then : > \"$a\"; fi\n\
             \tprev=\"$a\"\n\
             done\n\
             exit 0\n",
            log = self.log.display(),
        );
        write_executable(&self.stub_dir.join("wget"), &script);
    }

    /// Install a python3 stub whose `-m venv <dir>` call creates the venv
    /// skeleton with a logging pip inside it
    pub fn stub_python3(&self) {
        let pip_script = format!(
            "#!/bin/sh\nPATH=/usr/bin:/bin:$PATH\necho \"pip $@\" >> {log}\nexit 0\n",
            log = self.log.display(),
        );
        let pip_stub = self.stub_dir.join("pip-stub");
        write_executable(&pip_stub, &pip_script);

        let script = format!(
            "#!/bin/sh\n\
             PATH=/usr/bin:/bin:$PATH\n\
             echo \"python3 $@\" >> {log}\n\
             for a in \"$@\"; do venv=\"$a\"; done\n\
             mkdir -p \"$venv/bin\"\n\
             cp {pip_stub} \"$venv/bin/pip\"\n\
             exit 0\n",
            log = self.log.display(),
            pip_stub = pip_stub.display(),
        );
        write_executable(&self.stub_dir.join("python3"), &script);
    }

    /// PATH with the stub dir first
    pub fn path_env(&self) -> String {
        format!("{}:/usr/bin:/bin", self.stub_dir.display())
    }

    /// Logged stub invocations, in order
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .expect("Failed to read log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// hostprep command pointed at this app dir with the stub PATH
    #[allow(deprecated)]
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("hostprep").expect("binary builds");
        cmd.env("PATH", self.path_env())
            .env("TMPDIR", self.temp.path())
            .arg("--app-dir")
            .arg(&self.app_dir);
        cmd
    }
}
