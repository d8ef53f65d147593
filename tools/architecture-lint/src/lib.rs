//! Layer guardrails for the admin panel crate.
//!
//! The panel keeps its hexagon at the Rust module level: `domain` (types,
//! ports, services), `inbound` (HTTP pages and JSON API) and `outbound`
//! (platform admin API client, operator file). This crate parses every
//! source file under those trees and reports:
//!
//! - `domain` code reaching into adapter modules or web/HTTP/template crates
//! - `inbound` adapters importing `outbound` modules or the HTTP client
//! - `outbound` adapters importing `inbound` modules or server-side crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use syn::visit::Visit;

/// Library name of the linted crate, as seen from its own binaries.
const CRATE_NAME: &str = "admin_panel";

/// Boundary rules for one top-level module.
struct LayerRule {
    root: &'static str,
    forbidden_modules: &'static [&'static str],
    forbidden_crates: &'static [&'static str],
}

static RULES: [LayerRule; 3] = [
    LayerRule {
        root: "domain",
        forbidden_modules: &["inbound", "outbound"],
        forbidden_crates: &[
            "actix_session",
            "actix_web",
            "cap_std",
            "minijinja",
            "reqwest",
            "utoipa",
        ],
    },
    LayerRule {
        root: "inbound",
        forbidden_modules: &["outbound"],
        forbidden_crates: &["reqwest"],
    },
    LayerRule {
        root: "outbound",
        forbidden_modules: &["inbound"],
        forbidden_crates: &["actix_session", "actix_web", "minijinja", "utoipa"],
    },
];

fn rule_for(relative_path: &Path) -> Option<&'static LayerRule> {
    let first = relative_path.components().next()?.as_os_str().to_str()?;
    RULES.iter().find(|rule| rule.root == first)
}

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the crate's `src/` directory.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// A file could not be parsed or sits outside every known layer.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "architecture lint I/O failure: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} layer boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { .. } | Self::Violations(_) => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src/` directory.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the sources under `backend_dir/src`.
///
/// Missing layer directories are skipped.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src = Dir::open_ambient_dir(backend_dir.join("src"), ambient_authority())?;
    let mut sources = Vec::new();
    for rule in &RULES {
        if let Ok(dir) = src.open_dir(rule.root) {
            collect_sources(&dir, Path::new(rule.root), &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources. Paths must start with a layer directory.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let rule = rule_for(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/ or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(
            check_file(rule, &parsed)
                .into_iter()
                .map(|message| Violation {
                    file: source.file.clone(),
                    message,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Distinct violation messages for one parsed file.
fn check_file(rule: &LayerRule, parsed: &syn::File) -> BTreeSet<String> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        match classify(segments) {
            Some(PathTarget::Module(module)) if listed(rule.forbidden_modules, module) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{module}",
                    rule.root
                ));
            }
            Some(PathTarget::ExternalCrate(name)) if listed(rule.forbidden_crates, name) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{name}`",
                    rule.root
                ));
            }
            _ => {}
        }
    }
    messages
}

fn listed(names: &[&str], candidate: &str) -> bool {
    names.iter().any(|name| *name == candidate)
}

/// What the first meaningful segment of a path refers to.
enum PathTarget<'a> {
    /// A top-level module of the linted crate.
    Module(&'a str),
    /// Anything else, assumed to be a crate name.
    ExternalCrate(&'a str),
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn classify(segments: &[String]) -> Option<PathTarget<'_>> {
    let first = segments.first()?.as_str();
    if RULES.iter().any(|rule| rule.root == first) {
        return Some(PathTarget::Module(first));
    }
    if first == CRATE_NAME {
        return segments.get(1).map(|next| PathTarget::Module(next.as_str()));
    }
    if is_relative(first) {
        return segments
            .iter()
            .map(String::as_str)
            .find(|segment| !is_relative(segment))
            .map(PathTarget::Module);
    }
    Some(PathTarget::ExternalCrate(first))
}

/// Collects every path and `use` tree in a file as segment lists.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    dir: &Dir,
    relative: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry.file_name();
        let path = relative.join(&name);
        if entry.file_type()?.is_dir() {
            collect_sources(&entry.open_dir()?, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            sources.push(LintSource {
                contents: dir.read_to_string(&name)?,
                file: path,
            });
        }
    }
    Ok(())
}
