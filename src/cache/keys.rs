//! Cache key definitions.

/// Full record list as read from the content source.
pub const CONTENTS: &str = "contents";

/// Tag groups derived from the record list (or read precomputed).
pub const TAG_GROUPS: &str = "tag_groups";
