use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use url::Url;

/// An isolated home directory and a file-backed store.
pub struct Sandbox {
    pub dir: TempDir,
    pub home: PathBuf,
    pub store_path: PathBuf,
    pub store_url: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let store_path = dir.path().join("store");
        std::fs::create_dir_all(&home).unwrap();
        let store_url = Url::from_directory_path(&store_path)
            .expect("Failed to convert path to file URL")
            .to_string();
        Self {
            dir,
            home,
            store_path,
            store_url,
        }
    }

    /// Run the CLI with this sandbox's HOME and store.
    pub fn run(&self, args: &[&str]) -> Output {
        run_cli_with_env(args, &self.home, &self.store_url)
    }

    /// Run the CLI and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Log in as a plain member.
    pub fn login(&self, user_id: &str) {
        self.run_success(&["login", "--user-id", user_id, "--name", "Test User"]);
    }

    /// Log in with administration rights.
    pub fn login_admin(&self) {
        self.run_success(&["login", "--user-id", "admin-1", "--super-admin"]);
    }

    /// Create a record and return its key.
    pub fn create(&self, collection: &str, fields: &[&str]) -> String {
        let mut args = vec!["create", collection];
        for field in fields {
            args.push("--set");
            args.push(field);
        }
        let stdout = self.run_success(&args);
        stdout
            .lines()
            .next()
            .expect("create printed nothing")
            .trim()
            .to_string()
    }

    /// Fetch a record as JSON.
    pub fn get(&self, collection: &str, id: &str) -> serde_json::Value {
        let stdout = self.run_success(&["get", collection, id]);
        serde_json::from_str(stdout.trim()).unwrap()
    }
}

/// Run the CLI binary with a custom HOME directory for isolated session storage.
pub fn run_cli_with_env(args: &[&str], home: &Path, store_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_parish"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("PARISH_STORE_TOKEN");
    if !args.contains(&"--store") {
        cmd.env("PARISH_STORE", store_url);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// stderr of a finished command, for assertions.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
