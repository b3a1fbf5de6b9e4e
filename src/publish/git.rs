//! Git tagging of the published commit

use crate::publish::CommandSpec;

/// Tag name for a version: the first `*` in the format becomes the version
pub fn tag_name(format: &str, version: &str) -> String {
    format.replacen('*', version, 1)
}

/// `git tag <tag>`
pub fn tag(tag: &str) -> CommandSpec {
    CommandSpec::new("git", ["tag", tag])
}

/// `git push origin <tag>`
pub fn push_tag(tag: &str) -> CommandSpec {
    CommandSpec::new("git", ["push", "origin", tag])
}
