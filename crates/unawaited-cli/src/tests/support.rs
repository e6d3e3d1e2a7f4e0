//! Shared harness for driving the CLI runtime in-process.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use unawaited_config::Config;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

/// A Python module with one `with` statement that is missing its `await`.
pub(super) const MISSING_AWAIT: &str = "\
import io
async def make() -> io.BytesIO: ...
async def main():
    with make() as b:
        pass
";

/// The same module once the fix has been applied.
pub(super) const AWAITED: &str = "\
import io
async def make() -> io.BytesIO: ...
async def main():
    with await make() as b:
        pass
";

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// A scratch directory plus the captured result of the last run.
pub(super) struct TestWorld {
    dir: TempDir,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: Option<ExitCode>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }
}

impl TestWorld {
    pub(super) fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    pub(super) fn write(&self, name: &str, content: &str) {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write source");
    }

    pub(super) fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).expect("read source")
    }

    /// Runs `command`, replacing `$DIR` with the scratch directory.
    pub(super) fn run(&mut self, command: &str) {
        self.stdout.clear();
        self.stderr.clear();
        let root = self.root();
        let args: Vec<OsString> = std::iter::once(String::from("unawaited"))
            .chain(
                command
                    .split_whitespace()
                    .map(|token| token.trim_matches('"').replace("$DIR", root.as_str())),
            )
            .map(OsString::from)
            .collect();
        let loader = StaticConfigLoader {
            config: Config::default(),
        };
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr, false);
        self.exit_code = Some(run_with_loader(args, &mut io, &loader));
    }

    pub(super) fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout utf8")
    }

    pub(super) fn stderr_text(&self) -> String {
        String::from_utf8(self.stderr.clone()).expect("stderr utf8")
    }

    pub(super) fn assert_exit_code(&self, expected: u8) {
        let exit = self.exit_code.expect("exit code recorded");
        assert_eq!(exit, ExitCode::from(expected));
    }
}
