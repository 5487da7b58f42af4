//! Narrow a release build matrix to one platform.
//!
//! Two passes over the same document, in order:
//! 1. keep `builds` entries whose `goarch`/`goos` lists contain the filter
//!    values, collapsing those lists to the single filtered value;
//! 2. keep `archives` entries whose string `builds` references all name a
//!    surviving build `id`.
use serde_yaml::Value;
use tracing::debug;

use crate::lens::{Bound, Detached, Lens, Navigable, Peek};

/// Platform filters; `None` disables a dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub goos: Option<String>,
    pub goarch: Option<String>,
}

impl Filters {
    /// Empty strings mean "no filter", matching the CLI defaults.
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        fn non_empty(s: String) -> Option<String> {
            if s.is_empty() { None } else { Some(s) }
        }
        Filters {
            goos: non_empty(goos.into()),
            goarch: non_empty(goarch.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub builds_kept: usize,
    pub builds_dropped: usize,
    pub archives_kept: usize,
    pub archives_dropped: usize,
}

pub fn is_matching_build<N: Navigable + ?Sized>(filters: &Filters, build: &N) -> bool {
    let build = build.peek();
    if let Some(arch) = &filters.goarch
        && !build.field("goarch").contains_string(arch)
    {
        return false;
    }
    if let Some(os) = &filters.goos
        && !build.field("goos").contains_string(os)
    {
        return false;
    }
    true
}

/// Collapse each filtered platform list of a retained build to `[value]`.
pub fn normalize_build(filters: &Filters, build: &mut Bound<'_>) {
    let fields = [("goarch", &filters.goarch), ("goos", &filters.goos)];
    for (key, filter) in fields {
        if let Some(value) = filter
            && let Some(mut slot) = build.reborrow().field(key).bound()
        {
            slot.set(Detached::sequence([Detached::wrap(value.as_str())]));
        }
    }
}

/// String `id`s of the current builds, in document order.
pub fn build_ids(root: &Value) -> Detached {
    let ids = Peek::of(root)
        .field("builds")
        .elements()
        .into_iter()
        .filter_map(|build| build.field("id").as_str())
        .map(Detached::wrap);
    Detached::sequence(ids)
}

/// Every string reference must be a known id; other references pass.
pub fn is_matching_archive<I, A>(ids: &I, archive: &A) -> bool
where
    I: Navigable + ?Sized,
    A: Navigable + ?Sized,
{
    archive
        .peek()
        .field("builds")
        .elements()
        .into_iter()
        .filter_map(Peek::as_str)
        .all(|id| ids.contains_string(id))
}

/// Phase 1. Returns (kept, dropped).
pub fn filter_builds(filters: &Filters, root: &mut Value) -> (usize, usize) {
    let Some(mut builds) = Lens::root(root).field("builds").bound() else {
        return (0, 0);
    };
    let mut kept = Vec::new();
    let mut dropped = 0;
    for mut build in builds.reborrow().elements() {
        if is_matching_build(filters, &build) {
            normalize_build(filters, &mut build);
            kept.push(build.detach());
        } else {
            debug!(id = ?build.peek().field("id").as_str(), "dropping build");
            dropped += 1;
        }
    }
    let n = kept.len();
    builds.set(Detached::sequence(kept));
    (n, dropped)
}

/// Phase 2. Returns (kept, dropped).
pub fn prune_archives(root: &mut Value) -> (usize, usize) {
    let ids = build_ids(root);
    let Some(mut archives) = Lens::root(root).field("archives").bound() else {
        return (0, 0);
    };
    let mut kept = Vec::new();
    let mut dropped = 0;
    for archive in archives.reborrow().elements() {
        if is_matching_archive(&ids, &archive) {
            kept.push(archive.detach());
        } else {
            debug!(id = ?archive.peek().field("id").as_str(), "dropping archive");
            dropped += 1;
        }
    }
    let n = kept.len();
    archives.set(Detached::sequence(kept));
    (n, dropped)
}

/// Run both phases over `root` in place.
pub fn apply(filters: &Filters, root: &mut Value) -> FilterReport {
    let (builds_kept, builds_dropped) = filter_builds(filters, root);
    let (archives_kept, archives_dropped) = prune_archives(root);
    FilterReport {
        builds_kept,
        builds_dropped,
        archives_kept,
        archives_dropped,
    }
}
