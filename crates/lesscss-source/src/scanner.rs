//! Recognition of `@import` directives in raw stylesheet text.
//!
//! No LESS parser is available at this layer; directives are found by
//! statement-level text scanning. The recognized grammar is:
//!
//! ```text
//! "@import" [ "url(" | "(" ("less"|"css") ")" ]
//!     <quote> <path> <quote> [ ")" ] [ <trailing-clause> ] ";"
//! ```
//!
//! A directive on a full-line `//` comment (leading whitespace then `//`) is
//! never recognized.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one import statement. Captures: (1) the explicit type hint when
/// the `(less)`/`(css)` form is used, (2) the quoted path, (3) the trailing
/// clause between the closing quote/paren and the terminating `;`.
///
/// The path and trailing clause exclude newlines, so a statement never spans
/// lines; scanning is otherwise position-independent within the text.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@import\s+(?:url\(|\((less|css)\))?\s*["']([^"'\r\n]+?)\s*["']\)?([^;\r\n]*);"#)
        .unwrap()
});

/// Tests whether a path already carries a stylesheet extension
/// (`.less`, `.lss`, or `.css`).
static EXTENSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(le?|c)ss$").unwrap());

/// How an import is to be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Inline the imported document's flattened content in place of the
    /// directive.
    Less,
    /// Leave the directive verbatim for the downstream CSS pipeline.
    Css,
}

/// One recognized `@import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    /// Byte range of the whole statement, including the terminating `;`.
    pub span: Range<usize>,
    /// The import path after extension inference.
    pub path: String,
    pub kind: ImportKind,
    /// Free text between the closing quote/paren and the `;`; a media-query
    /// list when non-empty. Kept verbatim, leading whitespace included.
    pub media_query: String,
}

/// Finds the next import directive at or after byte offset `start`,
/// skipping matches that sit on full-line `//` comments.
pub fn find_import(text: &str, start: usize) -> Option<ImportDirective> {
    let mut search_from = start;
    while let Some(caps) = IMPORT_PATTERN.captures_at(text, search_from) {
        let matched = caps.get(0).unwrap();
        if on_comment_line(text, matched.start()) {
            search_from = matched.end();
            continue;
        }

        let path = normalize_path(caps.get(2).unwrap().as_str());
        let kind = match caps.get(1).map(|hint| hint.as_str()) {
            Some("css") => ImportKind::Css,
            Some(_) => ImportKind::Less,
            None if path.ends_with(".css") => ImportKind::Css,
            None => ImportKind::Less,
        };
        return Some(ImportDirective {
            span: matched.range(),
            path,
            kind,
            media_query: caps.get(3).unwrap().as_str().to_string(),
        });
    }
    None
}

/// Appends `.less` to paths that do not already end in a stylesheet
/// extension.
pub fn normalize_path(raw: &str) -> String {
    if EXTENSION_PATTERN.is_match(raw) {
        raw.to_string()
    } else {
        format!("{raw}.less")
    }
}

fn on_comment_line(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..].trim_start().starts_with("//")
}
