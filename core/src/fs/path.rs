//! Lexical path handling
//!
//! Paths are normalized without touching the tree: `.` and empty
//! components drop, `..` pops (and stays at root), backslashes count as
//! separators. A normalized path is absolute, has no trailing slash and
//! is at most [`MAX_PATH_LEN`] bytes.

use super::limits::{MAX_NAME_LEN, MAX_PATH_LEN};
use crate::error::{FsError, Result};
use alloc::string::String;
use alloc::vec::Vec;

/// Normalize `path` against the absolute directory `cwd`
pub fn normalize(cwd: &str, path: &str) -> Result<String> {
    let mut stack: Vec<&str> = Vec::new();

    let relative = !(path.starts_with('/') || path.starts_with('\\'));
    if relative {
        push_components(&mut stack, cwd)?;
    }
    push_components(&mut stack, path)?;

    let mut out = String::with_capacity(path.len() + cwd.len() + 1);
    for part in &stack {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('/');
    }

    if out.len() > MAX_PATH_LEN {
        return Err(FsError::Invalid);
    }
    Ok(out)
}

fn push_components<'a>(stack: &mut Vec<&'a str>, path: &'a str) -> Result<()> {
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            name if name.len() > MAX_NAME_LEN => return Err(FsError::Invalid),
            name => stack.push(name),
        }
    }
    Ok(())
}

/// Components of a normalized path, root first
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

/// Split a normalized path into parent directory and final name
///
/// Returns `None` for the root, which has no parent.
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let idx = path.rfind('/')?;
    let name = &path[idx + 1..];
    if name.is_empty() {
        return None;
    }
    let parent = if idx == 0 { "/" } else { &path[..idx] };
    Some((parent, name))
}

/// Directory part of `path`: `"/"` for root-level entries, `"."` when
/// there is no slash at all
pub fn dirname(path: &str) -> &str {
    let trimmed = trim_trailing_slashes(path);
    match trimmed.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
    }
}

/// Final component of `path`; the root is its own basename
pub fn basename(path: &str) -> &str {
    let trimmed = trim_trailing_slashes(path);
    if trimmed == "/" {
        return "/";
    }
    match trimmed.rfind('/') {
        None => trimmed,
        Some(idx) => &trimmed[idx + 1..],
    }
}

fn trim_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}
