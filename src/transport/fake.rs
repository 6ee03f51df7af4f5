//! Scripted runner for tests. Records every argv it is given.

use super::{ExecOutput, ProcessRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

type Handler = Box<dyn Fn(&[String]) -> Result<ExecOutput, String>>;

pub struct FakeRunner {
    handler: Handler,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new(handler: impl Fn(&[String]) -> Result<ExecOutput, String> + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Calls whose argv[0] is `program`.
    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|argv| argv.first().map(String::as_str) == Some(program))
            .cloned()
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, argv: &[String]) -> Result<ExecOutput, String> {
        self.calls.borrow_mut().push(argv.to_vec());
        (self.handler)(argv)
    }
}

pub fn ok(stdout: &str) -> ExecOutput {
    ExecOutput {
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn fail(exit_code: i32, stderr: &str) -> ExecOutput {
    ExecOutput {
        exit_code,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Create `<root>/<package>/msg/<Type>.idl` for each entry and return the
/// share directory of every package.
pub fn install_packages(root: &Path, packages: &[(&str, &[&str])]) -> Vec<(String, PathBuf)> {
    packages
        .iter()
        .map(|(package, types)| {
            let share = root.join(package);
            let msg_dir = share.join("msg");
            std::fs::create_dir_all(&msg_dir).unwrap();
            for t in *types {
                std::fs::write(msg_dir.join(format!("{t}.idl")), format!("// {t}\n")).unwrap();
            }
            (package.to_string(), share)
        })
        .collect()
}

/// Answer a registry lookup (`... <package>`) from a table of share dirs.
/// Unknown packages fail the way `ros2 pkg prefix` does.
pub fn registry_lookup(shares: &[(String, PathBuf)], argv: &[String]) -> ExecOutput {
    let package = argv.last().map(String::as_str).unwrap_or_default();
    match shares.iter().find(|(p, _)| p == package) {
        Some((_, share)) => ok(&format!("{}\n", share.display())),
        None => fail(1, "Package not found\n"),
    }
}

/// Behave like a well-mannered generator: for every `*.idl` argument write
/// `<lowercased stem>.h` and `.c` into the `-d` directory.
pub fn simulate_generator(argv: &[String]) -> ExecOutput {
    let out_dir = match argv.iter().position(|a| a == "-d") {
        Some(i) => PathBuf::from(&argv[i + 1]),
        None => return fail(2, "missing -d"),
    };
    for arg in argv.iter().filter(|a| a.ends_with(".idl")) {
        let stem = Path::new(arg)
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .to_lowercase();
        std::fs::write(out_dir.join(format!("{stem}.h")), "/* h */").unwrap();
        std::fs::write(out_dir.join(format!("{stem}.c")), "/* c */").unwrap();
    }
    ok("Generation done\n")
}
