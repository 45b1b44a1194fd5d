//! Default filename derivation for test cases.

use crate::config::DefaultFilenames;

/// Derives the file identity for a case without an explicit filename.
///
/// The result is `<root_dir><default_name>` where the default name is the
/// `ts` entry of `defaults`, or the `tsx` entry when JSX is enabled, and
/// `root_dir` is the type-aware-analysis root directory if one applies.
/// Never called for cases that declare a filename themselves.
#[must_use]
pub fn derive_filename(jsx: bool, defaults: &DefaultFilenames, root_dir: Option<&str>) -> String {
    let name = if jsx { &defaults.tsx } else { &defaults.ts };
    match root_dir {
        Some(root) => format!("{root}{name}"),
        None => name.clone(),
    }
}
