//! The LESS source graph: a stylesheet and its recursively resolved imports.

use std::time::SystemTime;

use encoding_rs::{Encoding, UTF_8};
use indexmap::IndexMap;
use lesscss_resource::{decode_text, HttpResource, Resource, ResourceError};
use tracing::debug;

use crate::error::{LessError, LessResult};
use crate::scanner::{find_import, normalize_path, ImportKind};

/// A stylesheet with its `@import` dependency graph resolved and inlined.
///
/// Construction is total-or-nothing: either the content is loaded and every
/// inlineable import is recursively resolved, or construction fails and no
/// partial value is observable. After construction the value is immutable.
pub struct LessSource {
    resource: Box<dyn Resource>,
    content: String,
    normalized_content: String,
    imports: IndexMap<String, LessSource>,
}

impl LessSource {
    /// Builds a source graph rooted at `resource`, reading content as UTF-8
    /// unless a byte-order mark says otherwise.
    pub fn new(resource: Box<dyn Resource>) -> LessResult<Self> {
        Self::with_encoding(resource, UTF_8)
    }

    /// Builds a source graph rooted at `resource`, reading content with the
    /// given default encoding. A byte-order mark, when present, overrides it.
    pub fn with_encoding(
        resource: Box<dyn Resource>,
        encoding: &'static Encoding,
    ) -> LessResult<Self> {
        Self::build(resource, encoding, IndexMap::new(), &mut Vec::new())
    }

    /// Builds a source graph with a pre-populated import map.
    ///
    /// This is the only way an in-memory string source can carry imports:
    /// each `@import` whose path matches a seed is treated as already
    /// resolved, so the directive is removed without being inlined. Seed keys
    /// are normalized with the same extension inference applied to scanned
    /// paths, so `"vars"` and `"vars.less"` name the same seed.
    pub fn with_seeded_imports(
        resource: Box<dyn Resource>,
        encoding: &'static Encoding,
        seeds: IndexMap<String, LessSource>,
    ) -> LessResult<Self> {
        let seeds = seeds
            .into_iter()
            .map(|(path, source)| (normalize_path(&path), source))
            .collect();
        Self::build(resource, encoding, seeds, &mut Vec::new())
    }

    fn build(
        resource: Box<dyn Resource>,
        encoding: &'static Encoding,
        seeds: IndexMap<String, LessSource>,
        resolution_path: &mut Vec<String>,
    ) -> LessResult<Self> {
        let name = resource.name();
        if !resource.exists() {
            return Err(ResourceError::NotFound { name }.into());
        }
        if resolution_path.contains(&name) {
            let mut chain = resolution_path.clone();
            chain.push(name);
            return Err(LessError::CyclicImport { chain });
        }

        let bytes = resource.open()?;
        let content = decode_text(&bytes, encoding, &name)?;

        resolution_path.push(name);
        let mut imports = seeds;
        let normalized_content = resolve_imports(
            resource.as_ref(),
            &content,
            &mut imports,
            encoding,
            resolution_path,
        );
        resolution_path.pop();

        Ok(Self {
            resource,
            content,
            normalized_content: normalized_content?,
            imports,
        })
    }

    /// The raw text as read and decoded.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The flattened text: every inlined import statement replaced by the
    /// imported document's own flattened content, every CSS passthrough
    /// import left verbatim.
    pub fn normalized_content(&self) -> &str {
        &self.normalized_content
    }

    /// The directly imported sources, keyed by normalized import path in
    /// first-encountered order. CSS passthrough imports are not tracked.
    pub fn imports(&self) -> &IndexMap<String, LessSource> {
        &self.imports
    }

    /// The identifier of the underlying resource.
    pub fn name(&self) -> String {
        self.resource.name()
    }

    /// The time this stylesheet itself was last modified.
    pub fn last_modified(&self) -> SystemTime {
        self.resource.last_modified()
    }

    /// The time this stylesheet, or anything it transitively imports, was
    /// last modified.
    pub fn last_modified_including_imports(&self) -> SystemTime {
        let mut latest = self.last_modified();
        for import in self.imports.values() {
            latest = latest.max(import.last_modified_including_imports());
        }
        latest
    }
}

impl std::fmt::Debug for LessSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessSource")
            .field("name", &self.resource.name())
            .field("imports", &self.imports.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// One left-to-right pass over `content`, building the flattened output:
/// text is copied up to each directive, the decision (inline / dedupe /
/// passthrough) is applied, and scanning continues after the directive.
fn resolve_imports(
    resource: &dyn Resource,
    content: &str,
    imports: &mut IndexMap<String, LessSource>,
    encoding: &'static Encoding,
    resolution_path: &mut Vec<String>,
) -> LessResult<String> {
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;

    while let Some(directive) = find_import(content, cursor) {
        match directive.kind {
            ImportKind::Css => {
                // Passthrough: the directive stays verbatim and is not
                // tracked as an import.
                output.push_str(&content[cursor..directive.span.end]);
                cursor = directive.span.end;
            }
            ImportKind::Less => {
                output.push_str(&content[cursor..directive.span.start]);
                cursor = directive.span.end;

                if imports.contains_key(&directive.path) {
                    // Duplicate import of the same path within this file:
                    // the directive is removed, the content not repeated.
                    debug!(path = %directive.path, "skipping duplicate import");
                    continue;
                }

                debug!(path = %directive.path, "importing");
                let child_resource = imported_resource(resource, &directive.path)?;
                let child =
                    LessSource::build(child_resource, encoding, IndexMap::new(), resolution_path)?;

                if directive.media_query.is_empty() {
                    output.push_str(child.normalized_content());
                } else {
                    output.push_str("@media");
                    output.push_str(&directive.media_query);
                    output.push_str("{\n");
                    output.push_str(child.normalized_content());
                    output.push_str("}\n");
                }
                imports.insert(directive.path, child);
            }
        }
    }

    output.push_str(&content[cursor..]);
    Ok(output)
}

/// Absolute `http:`/`https:` import paths are fetched directly; everything
/// else resolves relative to the importing resource.
fn imported_resource(resource: &dyn Resource, path: &str) -> LessResult<Box<dyn Resource>> {
    if path.starts_with("http:") || path.starts_with("https:") {
        Ok(Box::new(HttpResource::new(path)?))
    } else {
        Ok(resource.create_relative(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesscss_resource::StringResource;
    use std::time::UNIX_EPOCH;

    fn string_source(text: &str) -> LessResult<LessSource> {
        LessSource::new(Box::new(StringResource::new(text, "<inline>")))
    }

    #[test]
    fn test_source_without_imports() {
        let source = string_source("@c: red;\nbody { color: @c; }\n").unwrap();
        assert_eq!(source.content(), source.normalized_content());
        assert!(source.imports().is_empty());
        assert_eq!(source.last_modified(), UNIX_EPOCH);
        assert_eq!(source.last_modified_including_imports(), UNIX_EPOCH);
        assert_eq!(source.name(), "<inline>");
    }

    #[test]
    fn test_css_passthrough_stays_verbatim() {
        let source = string_source("@import \"reset.css\";\nbody { }\n").unwrap();
        assert_eq!(source.normalized_content(), "@import \"reset.css\";\nbody { }\n");
        assert!(source.imports().is_empty());
    }

    #[test]
    fn test_string_source_import_without_seed_is_a_configuration_error() {
        let err = string_source("@import \"vars.less\";\n").unwrap_err();
        assert!(matches!(
            err,
            LessError::Resource(ResourceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_seeded_import_is_removed_without_inlining() {
        let seed = string_source("@c: red;").unwrap();
        let mut seeds = IndexMap::new();
        seeds.insert("vars.less".to_string(), seed);

        let source = LessSource::with_seeded_imports(
            Box::new(StringResource::new(
                "@import \"vars.less\";\nbody { }\n",
                "<inline>",
            )),
            UTF_8,
            seeds,
        )
        .unwrap();

        assert_eq!(source.normalized_content(), "\nbody { }\n");
        assert_eq!(source.imports().len(), 1);
    }

    #[test]
    fn test_seed_keys_are_normalized() {
        // Seeded as "vars", imported as "vars" (scanned as "vars.less"):
        // both name the same entry after extension inference.
        let seed = string_source("@c: red;").unwrap();
        let mut seeds = IndexMap::new();
        seeds.insert("vars".to_string(), seed);

        let source = LessSource::with_seeded_imports(
            Box::new(StringResource::new("@import \"vars\";\n", "<inline>")),
            UTF_8,
            seeds,
        )
        .unwrap();

        assert_eq!(source.normalized_content(), "\n");
        assert!(source.imports().contains_key("vars.less"));
    }
}
