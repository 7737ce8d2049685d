//! Internal reference rewriting
//!
//! Source bodies point at resources and other notes with `(:/<32 hex id>)`
//! link targets. Two passes rewrite them for the destination layout:
//!
//! 1. `![alt](:/id)` becomes `![alt](<resources>/<file>)`, or the sentinel
//!    `![alt](:/missing-id)` when the id is not a known resource.
//! 2. `[text](:/id)` becomes `[text](<resources>/<file>)` for a known
//!    resource (an attachment), otherwise the wiki-link `[[id|text]]`.
//!
//! The image pass must run first: the plain pattern also matches the tail of
//! an image token. Anything not matching the 32-hex grammar is left alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::collector::ResourceRenames;
use crate::constants as C;

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(:/([0-9a-fA-F]{32})\)").unwrap());

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(:/([0-9a-fA-F]{32})\)").unwrap());

/// Result of rewriting one body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rewritten {
    pub text: String,
    /// Image references whose resource id was not found, in document order
    pub missing: Vec<String>,
    /// Number of references turned into wiki-links
    pub note_links: usize,
}

/// Rewrites bodies against a finished resource table
pub struct Rewriter<'a> {
    resources: &'a ResourceRenames,
}

impl<'a> Rewriter<'a> {
    pub fn new(resources: &'a ResourceRenames) -> Self {
        Self { resources }
    }

    /// Rewrite every internal reference in `body`.
    ///
    /// `resources_path` is the note-relative path of the resource directory,
    /// see [`crate::hierarchy::resources_relative_path`].
    pub fn rewrite(&self, body: &str, resources_path: &str) -> Rewritten {
        let mut missing = Vec::new();
        let mut note_links = 0;

        let images = IMAGE_RE.replace_all(body, |caps: &Captures| {
            let alt = &caps[1];
            let id = &caps[2];
            match self.resources.get(id) {
                Some(file) => format!("![{}]({}/{})", alt, resources_path, file),
                None => {
                    missing.push(id.to_string());
                    format!("![{}]({}{})", alt, C::MISSING_PREFIX, id)
                }
            }
        });

        let text = LINK_RE.replace_all(&images, |caps: &Captures| {
            let text = &caps[1];
            let id = &caps[2];
            match self.resources.get(id) {
                Some(file) => format!("[{}]({}/{})", text, resources_path, file),
                None => {
                    note_links += 1;
                    format!("[[{}|{}]]", id, text)
                }
            }
        });

        Rewritten {
            text: text.into_owned(),
            missing,
            note_links,
        }
    }
}

/// Rewrite `body` and return only the text
pub fn rewrite(body: &str, resources: &ResourceRenames, resources_path: &str) -> String {
    Rewriter::new(resources).rewrite(body, resources_path).text
}

#[cfg(test)]
mod tests {
    use super::*;

    const RES: &str = "deadbeefdeadbeefdeadbeefdeadbee0";
    const NOTE: &str = "0123456789abcdef0123456789abcdef";

    fn renames() -> ResourceRenames {
        let mut r = ResourceRenames::default();
        r.record(RES, "photo.png");
        r
    }

    #[test]
    fn test_image_resolved() {
        let out = rewrite(&format!("![img](:/{})", RES), &renames(), "../resources");
        assert_eq!(out, "![img](../resources/photo.png)");
    }

    #[test]
    fn test_image_missing_keeps_alt() {
        let r = Rewriter::new(&ResourceRenames::default())
            .rewrite(&format!("see ![my alt](:/{})", NOTE), "resources");
        assert_eq!(r.text, format!("see ![my alt](:/missing-{})", NOTE));
        assert_eq!(r.missing, vec![NOTE.to_string()]);
    }

    #[test]
    fn test_upper_case_reference_resolves() {
        let body = format!("![img](:/{0}) [doc](:/{0})", RES.to_ascii_uppercase());
        let out = rewrite(&body, &renames(), "resources");
        assert_eq!(out, "![img](resources/photo.png) [doc](resources/photo.png)");
    }

    #[test]
    fn test_attachment_link() {
        let out = rewrite(&format!("[report](:/{})", RES), &renames(), "resources");
        assert_eq!(out, "[report](resources/photo.png)");
    }

    #[test]
    fn test_note_link_becomes_wiki_link() {
        let r = Rewriter::new(&renames()).rewrite(&format!("go [there](:/{}) now", NOTE), "resources");
        assert_eq!(r.text, format!("go [[{}|there]] now", NOTE));
        assert_eq!(r.note_links, 1);
    }

    #[test]
    fn test_image_pass_runs_first() {
        // a missing image must not be turned into a wiki-link
        let out = rewrite(&format!("![x](:/{})", NOTE), &renames(), "resources");
        assert_eq!(out, format!("![x](:/missing-{})", NOTE));
    }

    #[test]
    fn test_external_links_untouched() {
        let body = "[site](https://example.com) ![pic](https://example.com/a.png) [short](:/abc)\n```\n[x](:/nothex)\n```";
        assert_eq!(rewrite(body, &renames(), "resources"), body);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let body = format!("![img](:/{}) [n](:/{}) ![gone](:/{})", RES, NOTE, "f".repeat(32));
        let once = rewrite(&body, &renames(), "../resources");
        let twice = rewrite(&once, &renames(), "../resources");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_all_occurrences_rewritten() {
        let body = format!("[a](:/{0}) and [b](:/{0})", NOTE);
        let r = Rewriter::new(&renames()).rewrite(&body, "resources");
        assert_eq!(r.text, format!("[[{0}|a]] and [[{0}|b]]", NOTE));
        assert_eq!(r.note_links, 2);
    }
}
