//! Command interpreter over the filesystem facade
//!
//! Every command returns its output as text; errors become messages and the
//! shell carries on.

use konstruct_core::fs::EntryKind;
use konstruct_core::Filesystem;
use std::fmt::Write;

const LIST_BUFFER: usize = 4096;

const HELP: &str = "\
Available commands:
  ls [path]        - List directory contents
  cd [path]        - Change directory (default /)
  pwd              - Print working directory
  mkdir <path>     - Create a directory
  rmdir <path>     - Remove an empty directory
  touch <path>     - Create an empty file
  rm <path>        - Delete a file
  cat <path>       - Print a file
  echo <text> > <path> - Write text to a file
  stat <path>      - Show file information
  mount            - List mounted filesystems
  remount <path>   - Move the boot device mount
  help             - Show this help message
  exit             - Leave the shell
";

/// Result of one command line
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and read the next line
    Continue(String),
    /// Leave the shell
    Exit,
}

pub struct Shell {
    fs: Filesystem,
}

impl Shell {
    pub fn new(fs: Filesystem) -> Self {
        Self { fs }
    }

    /// Current directory, shown in the prompt
    pub fn prompt(&self) -> String {
        self.fs.cwd()
    }

    pub fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        let output = match cmd {
            "" => String::new(),
            "exit" => return Outcome::Exit,
            "help" => String::from(HELP),
            "ls" => self.ls(if rest.is_empty() { "." } else { rest }),
            "cd" => self.cd(if rest.is_empty() { "/" } else { rest }),
            "pwd" => format!("{}\n", self.fs.cwd()),
            "mkdir" if !rest.is_empty() => {
                status(self.fs.mkdir(rest), "Could not create directory")
            }
            "rmdir" if !rest.is_empty() => {
                status(self.fs.rmdir(rest), "Could not remove directory")
            }
            "touch" if !rest.is_empty() => status(self.fs.create(rest), "Could not create file"),
            "rm" if !rest.is_empty() => status(self.fs.delete(rest), "Could not delete file"),
            "cat" if !rest.is_empty() => self.cat(rest),
            "echo" => self.echo(rest),
            "stat" if !rest.is_empty() => self.stat(rest),
            "mount" if rest.is_empty() => self.mounts(),
            "mount" => String::from("Manual mounting not yet supported\n"),
            "remount" if !rest.is_empty() => match self.fs.remount(rest) {
                Ok(()) => format!("Remounted boot device to {}\n", rest),
                Err(err) => format!("Failed to remount device: {}\n", err),
            },
            _ => format!("Unknown command: {}. Type 'help' for a list.\n", line),
        };
        Outcome::Continue(output)
    }

    fn ls(&mut self, path: &str) -> String {
        let mut buf = vec![0u8; LIST_BUFFER];
        match self.fs.listdir(path, &mut buf) {
            Ok(n) => String::from_utf8_lossy(&buf[..n]).into_owned(),
            Err(err) => format!("Error: Could not list directory: {}\n", err),
        }
    }

    fn cd(&mut self, path: &str) -> String {
        status(self.fs.chdir(path), "Could not change directory")
    }

    fn cat(&mut self, path: &str) -> String {
        let size = match self.fs.getsize(path) {
            Ok(size) => size as usize,
            Err(err) => return format!("Error: File not found: {}\n", err),
        };

        let mut buf = vec![0u8; size];
        match self.fs.read(path, &mut buf, 0) {
            Ok(n) => {
                let mut out = String::from_utf8_lossy(&buf[..n]).into_owned();
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out
            }
            Err(err) => format!("Error: Could not read file: {}\n", err),
        }
    }

    fn echo(&mut self, args: &str) -> String {
        let Some((text, path)) = args.split_once(" > ") else {
            return format!("{}\n", args);
        };
        let path = path.trim();

        if !self.fs.exists(path) {
            if let Err(err) = self.fs.create(path) {
                return format!("Error: Could not create file: {}\n", err);
            }
        }

        let content = format!("{}\n", text);
        match self.fs.write(path, content.as_bytes(), 0) {
            Ok(_) => String::new(),
            Err(err) => format!("Error: Could not write to file: {}\n", err),
        }
    }

    fn stat(&mut self, path: &str) -> String {
        let meta = match self.fs.stat(path) {
            Ok(meta) => meta,
            Err(err) => return format!("Error: {}\n", err),
        };

        let kind = match meta.kind {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
        };
        let mut out = String::new();
        let _ = writeln!(out, "  File: {}", path);
        let _ = writeln!(out, "  Type: {}", kind);
        let _ = writeln!(out, "  Size: {}", meta.size);
        let _ = writeln!(
            out,
            "  Mode: {}",
            String::from_utf8_lossy(&meta.perms.as_rwx())
        );
        let _ = writeln!(out, "  Created: {}  Modified: {}", meta.created, meta.modified);
        out
    }

    fn mounts(&self) -> String {
        let mut out = String::from("Mounted filesystems:\n");
        let mut any = false;
        for mount in self.fs.mounts() {
            any = true;
            let mode = if mount.is_read_only() {
                "read-only"
            } else {
                "read-write"
            };
            let _ = writeln!(out, "  {} on {} ({})", mount.kind().name(), mount.path(), mode);
        }
        if !any {
            out.push_str("  No filesystems mounted\n");
        }
        out
    }
}

fn status(result: konstruct_core::Result<()>, what: &str) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => format!("Error: {}: {}\n", what, err),
    }
}
