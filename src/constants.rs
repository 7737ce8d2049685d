//! Constants for noteport
//!
//! File names, placeholders, link grammar fragments and limits shared by the
//! collector, resolver, rewriter and emitter.

// === File and Directory Names ===

/// Shared resource directory, directly under the export root
pub const RESOURCES_DIR: &str = "resources";

/// Extension of every emitted note file
pub const MARKDOWN_EXTENSION: &str = "md";

/// Placeholder for folder names that sanitize to nothing
pub const UNNAMED_FOLDER: &str = "_unnamed";

/// Characters that may not appear in an output directory or file name
pub const ILLEGAL_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// One level up in a relative link
pub const PARENT_DIR_TOKEN: &str = "../";

// === Note Titles ===

/// Heading used when a note has an empty title
pub const UNTITLED_NOTE_TITLE: &str = "Untitled";

// === Front Matter ===

/// Front matter delimiter line
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Marker for an empty tag sequence
pub const EMPTY_TAGS: &str = "tags: []";

// === Reference Tokens ===

/// Prefix of the sentinel left behind for unresolved image references
pub const MISSING_PREFIX: &str = ":/missing-";

// === Host Boundary ===

/// Items and tags requested per page from a dump store
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Upper bound on tag pages fetched for a single note
pub const MAX_TAG_PAGES: usize = 1000;

/// Upper bound on item pages fetched for a single run
pub const MAX_ITEM_PAGES: usize = 1_000_000;

// === Hash and ID Constants ===

/// Length of abbreviated hash used to disambiguate resource names
pub const HASH_ABBREVIATION_LENGTH: usize = 12;

// === Configuration ===

/// Directory under the platform config dir holding our config file
pub const CONFIG_DIR_NAME: &str = "noteport";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable overriding the fixed export directory
pub const ENV_EXPORT_DIR: &str = "NOTEPORT_EXPORT_DIR";
