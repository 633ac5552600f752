use log::trace;
use serde_json::Value;

use crate::path::Path;

/// Walk a JSON tree depth first, calling `visitor` for every node
///
/// The root is offered first, at the empty path. Whenever `visitor` returns
/// `false` the children of that node are skipped; the rest of the tree is
/// still walked. Object members are visited in map order, which callers
/// should not rely on, array elements in ascending index order.
///
/// The walk recurses once per level, so the depth it can handle is bounded
/// by the caller's stack.
///
/// ```
/// use json_visitor::visit;
/// use serde_json::json;
///
/// let doc = json!({"a": [1, 2], "b": {"c": null}});
/// let mut paths = Vec::new();
/// visit(&doc, |path, _value| {
///     paths.push(path.to_string());
///     path.last() != Some("b")
/// });
/// assert_eq!(paths, ["", "a", "a.0", "a.1", "b"]);
/// ```
pub fn visit<'v, F>(root: &'v Value, visitor: F)
where
    F: FnMut(&Path, &'v Value) -> bool,
{
    visit_with_path(&Path::root(), root, visitor)
}

/// Like [`visit`], but the walk starts at a known location
///
/// Useful to resume a subtree that was skipped earlier: keep the path and
/// value from the callback and pass them back in here later, and the paths
/// reported for the subtree are the same as in an uninterrupted walk.
pub fn visit_with_path<'v, F>(path: &Path, entry: &'v Value, mut visitor: F)
where
    F: FnMut(&Path, &'v Value) -> bool,
{
    walk(path, entry, &mut visitor);
}

fn walk<'v, F>(path: &Path, entry: &'v Value, visitor: &mut F)
where
    F: FnMut(&Path, &'v Value) -> bool,
{
    if !visitor(path, entry) {
        trace!("not descending below '{}'", path);
        return;
    }

    match entry {
        Value::Object(map) => {
            for (key, value) in map {
                walk(&path.child(key.as_str()), value, visitor);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                walk(&path.index(index), value, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
