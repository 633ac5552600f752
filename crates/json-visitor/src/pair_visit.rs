use log::trace;

use crate::path::Path;
use crate::undefined::Slot;

/// Walk two JSON trees in lockstep, depth first
///
/// `visitor` receives the current path and the node found there in each
/// tree. Where a key or index only exists in one tree, the other side is
/// [`Slot::Undefined`]. Returning `false` skips the children of the pair.
///
/// A pair whose sides are both undefined is never reported. Both sides may
/// be given as `&Value`, [`Undefined`](crate::Undefined), `Option<&Value>`
/// or [`Slot`].
///
/// The walk recurses once per level, so the depth it can handle is bounded
/// by the caller's stack.
///
/// ```
/// use json_visitor::{pair_visit, Undefined};
/// use serde_json::json;
///
/// let old = json!({"name": "a", "tags": ["x"]});
/// let new = json!({"name": "a", "tags": ["x", "y"]});
/// let mut added = Vec::new();
/// pair_visit(&old, &new, |path, a, b| {
///     if a == Undefined {
///         added.push(format!("{} = {}", path, b));
///     }
///     true
/// });
/// assert_eq!(added, ["tags.1 = \"y\""]);
/// ```
pub fn pair_visit<'a, A, B, F>(a: A, b: B, visitor: F)
where
    A: Into<Slot<'a>>,
    B: Into<Slot<'a>>,
    F: FnMut(&Path, Slot<'a>, Slot<'a>) -> bool,
{
    pair_visit_with_path(&Path::root(), a, b, visitor)
}

/// Like [`pair_visit`], but the walk starts at a known location
///
/// Pass back a path and the two sides received in an earlier callback to
/// resume a pair whose children were skipped.
pub fn pair_visit_with_path<'a, A, B, F>(path: &Path, a: A, b: B, mut visitor: F)
where
    A: Into<Slot<'a>>,
    B: Into<Slot<'a>>,
    F: FnMut(&Path, Slot<'a>, Slot<'a>) -> bool,
{
    walk_pair(path, a.into(), b.into(), &mut visitor);
}

fn walk_pair<'a, F>(path: &Path, a: Slot<'a>, b: Slot<'a>, visitor: &mut F)
where
    F: FnMut(&Path, Slot<'a>, Slot<'a>) -> bool,
{
    match (a, b) {
        (Slot::Undefined, Slot::Undefined) => return,
        (Slot::Undefined, _) => trace!("'{}' only present on the right", path),
        (_, Slot::Undefined) => trace!("'{}' only present on the left", path),
        _ => {}
    }

    if !visitor(path, a, b) {
        trace!("not descending below '{}'", path);
        return;
    }

    // a pair can only really match one of these, but both are tried
    pair_arrays(path, a, b, visitor);
    pair_objects(path, a, b, visitor);
}

fn pair_arrays<'a, F>(path: &Path, a: Slot<'a>, b: Slot<'a>, visitor: &mut F)
where
    F: FnMut(&Path, Slot<'a>, Slot<'a>) -> bool,
{
    let left = a.as_array().unwrap_or_default();
    let right = b.as_array().unwrap_or_default();

    // indices past the shorter array pair up with Undefined
    for index in 0..left.len().max(right.len()) {
        walk_pair(
            &path.index(index),
            left.get(index).into(),
            right.get(index).into(),
            visitor,
        );
    }
}

fn pair_objects<'a, F>(path: &Path, a: Slot<'a>, b: Slot<'a>, visitor: &mut F)
where
    F: FnMut(&Path, Slot<'a>, Slot<'a>) -> bool,
{
    let left = a.as_object();
    let right = b.as_object();

    for (key, value) in left.into_iter().flatten() {
        let other = right.and_then(|right| right.get(key));
        walk_pair(&path.child(key.as_str()), Slot::Defined(value), other.into(), visitor);
    }

    // members only present on the right
    for (key, value) in right.into_iter().flatten() {
        if left.is_some_and(|left| left.contains_key(key)) {
            continue;
        }
        walk_pair(&path.child(key.as_str()), Slot::Undefined, Slot::Defined(value), visitor);
    }
}
