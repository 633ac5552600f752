use std::collections::BTreeMap;

use json_visitor::{pair_visit, pair_visit_with_path, Path, Slot, Undefined};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Owned copy of one side of a pair, so it can outlive the callback
#[derive(Debug, Clone, PartialEq)]
enum Side {
    Value(Value),
    Undefined,
}

impl From<Slot<'_>> for Side {
    fn from(slot: Slot<'_>) -> Self {
        match slot {
            Slot::Defined(value) => Side::Value(value.clone()),
            Slot::Undefined => Side::Undefined,
        }
    }
}

fn collect_pairs(a: &Value, b: &Value, prune: &str) -> BTreeMap<String, (Side, Side)> {
    let mut called = BTreeMap::new();
    pair_visit(a, b, |path, a, b| {
        let key = path.to_string();
        let previous = called.insert(key.clone(), (Side::from(a), Side::from(b)));
        assert!(previous.is_none(), "visited {:?} twice", key);
        key != prune
    });
    called
}

fn defined(value: Value) -> Side {
    Side::Value(value)
}

#[test]
fn test_pair_visit() {
    let doc_a = json!({"a": 0, "b": [1], "c": "1", "e": [1], "ignore": [0]});
    let doc_b = json!({"a": 0, "b": [2], "d": "1", "e": [1, 2], "ignore": [0]});

    let called = collect_pairs(&doc_a, &doc_b, "ignore");

    let expected: BTreeMap<String, (Side, Side)> = [
        ("", (defined(doc_a.clone()), defined(doc_b.clone()))),
        ("a", (defined(json!(0)), defined(json!(0)))),
        ("b", (defined(json!([1])), defined(json!([2])))),
        ("b.0", (defined(json!(1)), defined(json!(2)))),
        ("c", (defined(json!("1")), Side::Undefined)),
        ("d", (Side::Undefined, defined(json!("1")))),
        ("e", (defined(json!([1])), defined(json!([1, 2])))),
        ("e.0", (defined(json!(1)), defined(json!(1)))),
        ("e.1", (Side::Undefined, defined(json!(2)))),
        ("ignore", (defined(json!([0])), defined(json!([0])))),
    ]
    .into_iter()
    .map(|(path, pair)| (path.to_string(), pair))
    .collect();

    assert_eq!(called, expected);
}

#[test]
fn test_undefined_pair() {
    pair_visit(Undefined, Undefined, |_, _, _| -> bool {
        panic!("If both inputs are undefined this func should not be called")
    });
    pair_visit_with_path(
        &Path::from(vec!["x"]),
        Slot::Undefined,
        Option::<&Value>::None,
        |_, _, _| -> bool { panic!("called for a pair of missing values") },
    );
}

#[test]
fn test_left_array_longer() {
    let a = json!([1, 2, 3]);
    let b = json!([1]);

    let called = collect_pairs(&a, &b, "");

    // pruned at the root
    assert_eq!(called.len(), 1);

    let called = collect_pairs(&a, &b, "-");
    assert_eq!(called["0"], (defined(json!(1)), defined(json!(1))));
    assert_eq!(called["1"], (defined(json!(2)), Side::Undefined));
    assert_eq!(called["2"], (defined(json!(3)), Side::Undefined));
    assert_eq!(called.len(), 4);
}

#[test]
fn test_right_array_longer() {
    let a = json!({"list": []});
    let b = json!({"list": ["x", ["y"]]});

    let called = collect_pairs(&a, &b, "-");

    assert_eq!(called["list.0"], (Side::Undefined, defined(json!("x"))));
    assert_eq!(called["list.1"], (Side::Undefined, defined(json!(["y"]))));
    // descent continues below a one-sided node
    assert_eq!(called["list.1.0"], (Side::Undefined, defined(json!("y"))));
    assert_eq!(called.len(), 5);
}

#[test]
fn test_array_indices_ascend() {
    let a = json!([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let b = json!([0, 1, 2]);
    let mut order = Vec::new();

    pair_visit(&a, &b, |path, _, _| {
        if let Some(last) = path.last() {
            order.push(last.parse::<usize>().unwrap());
        }
        true
    });

    assert_eq!(order, (0..11).collect::<Vec<_>>());
}

#[test]
fn test_mismatched_shapes() {
    let a = json!({"k": {"x": 1}});
    let b = json!({"k": "scalar"});

    let called = collect_pairs(&a, &b, "-");

    assert_eq!(called["k"], (defined(json!({"x": 1})), defined(json!("scalar"))));
    assert_eq!(called["k.x"], (defined(json!(1)), Side::Undefined));
    assert_eq!(called.len(), 3);
}

#[test]
fn test_array_against_object_pairs_both_ways() {
    let a = json!([5]);
    let b = json!({"0": 1});
    let mut calls = Vec::new();

    pair_visit(&a, &b, |path, a, b| {
        calls.push((path.to_string(), Side::from(a), Side::from(b)));
        true
    });

    assert_eq!(
        calls,
        vec![
            ("".to_string(), defined(a.clone()), defined(b.clone())),
            ("0".to_string(), defined(json!(5)), Side::Undefined),
            ("0".to_string(), Side::Undefined, defined(json!(1))),
        ]
    );
}

#[test]
fn test_null_is_not_undefined() {
    let a = json!({"n": null});
    let b = json!({});
    let mut seen = None;

    pair_visit(&a, &b, |path, a, b| {
        if path.last() == Some("n") {
            seen = Some((a, b));
        }
        true
    });

    let (left, right) = seen.expect("member n was not visited");
    assert_eq!(left, Slot::Defined(&Value::Null));
    assert!(left != Undefined);
    assert!(right == Undefined);
}

#[test]
fn test_one_sided_roots() {
    let doc = json!({"a": [1]});
    let mut paths = Vec::new();

    pair_visit(&doc, Undefined, |path, a, b| {
        assert!(a.is_defined());
        assert!(b.is_undefined());
        paths.push(path.to_string());
        true
    });

    assert_eq!(paths, vec!["", "a", "a.0"]);
}

#[test]
fn test_resume_pruned_pair() {
    let a = json!({"keep": 1, "later": {"x": [1]}});
    let b = json!({"keep": 2, "later": {"x": [1, 2], "y": true}});
    let mut deferred = Vec::new();

    pair_visit(&a, &b, |path, a, b| {
        if path.last() == Some("later") {
            deferred.push((path.clone(), a, b));
            return false;
        }
        true
    });

    let mut resumed = Vec::new();
    for (path, a, b) in deferred {
        pair_visit_with_path(&path, a, b, |path, a, b| {
            resumed.push(format!("{} {} {}", path, a, b));
            true
        });
    }

    assert_eq!(
        resumed,
        vec![
            r#"later {"x":[1]} {"x":[1,2],"y":true}"#,
            "later.x [1] [1,2]",
            "later.x.0 1 1",
            "later.x.1 Undefined 2",
            "later.y Undefined true",
        ]
    );
}

#[test]
fn test_identical_trees_never_see_undefined() {
    let doc = json!({"a": [1, {"b": null}], "c": {"d": "e"}});
    let mut count = 0;

    pair_visit(&doc, &doc, |_, a, b| {
        assert_eq!(a, b);
        assert!(a.is_defined());
        count += 1;
        true
    });

    assert_eq!(count, 7);
}

#[test]
fn test_independent_traversals_on_threads() {
    let a = json!({"list": [1, 2, 3], "obj": {"k": "v"}});
    let b = json!({"list": [1], "other": null});
    let prefix = Path::from(vec!["shared"]);

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut count = 0;
                    pair_visit_with_path(&prefix, &a, &b, |path, _, _| {
                        assert!(path.starts_with(&prefix));
                        count += 1;
                        true
                    });
                    count
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // root, list, list.0..2, obj, obj.k, other
    assert_eq!(counts, vec![8; 4]);
}
