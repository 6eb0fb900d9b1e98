//! Read-only pseudo-filesystem consulted by `cat` and listed by `ls`.
//!
//! Flat namespace, fixed at build time. Directory-like entries are listed
//! with a trailing `/` and looked up without it.

use crate::config::Config;
use crate::content;
use crate::output::Block;

/// Names shown by `ls`, in display order.
pub const LISTING: [&str; 5] = [
    "about.txt",
    "contact.txt",
    "projects/",
    "skills.txt",
    "socials.txt",
];

/// Strip one trailing path separator.
pub fn normalize(name: &str) -> &str {
    name.strip_suffix('/').unwrap_or(name)
}

/// Content for a file name (typed with or without a trailing `/`).
pub fn read(name: &str, config: &Config) -> Option<Block> {
    let block = match normalize(name) {
        "about.txt" => content::about(),
        "contact.txt" => content::contact(config),
        "projects" => content::projects(config),
        "skills.txt" => content::skills(),
        "socials.txt" => content::socials(config),
        _ => return None,
    };
    Some(block)
}
