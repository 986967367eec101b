//! Example content created at boot

use crate::error::{FsError, Result};
use crate::facade::Filesystem;

const MOTD: &str = "Welcome to konstruct!\nThis is a simple in-memory filesystem designed to show you the use case of whatever this is.\n";

const HELLO: &str = "Hello, world!\nThis is a test file.\n";

const DIRECTORIES: &[&str] = &["/bin", "/etc", "/home", "/home/user", "/cdrom", "/media"];

const FILES: &[(&str, &str)] = &[
    ("/etc/motd", MOTD),
    ("/home/user/hello.txt", HELLO),
    ("/bin/meow", ""),
];

/// Populate the tree with the standard directories and welcome files
///
/// Entries that already exist are left alone, so seeding twice is harmless.
pub fn seed_example_tree(fs: &mut Filesystem) -> Result<()> {
    for dir in DIRECTORIES {
        match fs.mkdir(dir) {
            Ok(()) | Err(FsError::Exists) => {}
            Err(err) => return Err(err),
        }
    }

    for (path, content) in FILES {
        match fs.create(path) {
            Ok(()) => {
                if !content.is_empty() {
                    fs.write(path, content.as_bytes(), 0)?;
                }
            }
            Err(FsError::Exists) => {}
            Err(err) => return Err(err),
        }
    }

    log::debug!("fs: example tree created");
    Ok(())
}
