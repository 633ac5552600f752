use anyhow::Result;
use json_visitor::{pair_visit, Slot};
use serde_json::Value;

fn main() -> Result<()> {
    env_logger::init();

    // Two versions of the same configuration document
    let old: Value = serde_json::from_str(
        r#"{
            "name": "service",
            "ports": [80, 443],
            "limits": {"cpu": 2, "memory": "1G"},
            "volumes": {},
            "debug": false
        }"#,
    )?;
    let new: Value = serde_json::from_str(
        r#"{
            "name": "service",
            "ports": [8080, 443, 9000],
            "limits": {"cpu": 4, "memory": "1G"},
            "volumes": [],
            "tracing": {"enabled": true}
        }"#,
    )?;

    println!("Changes between the two documents:");
    for line in report(&old, &new) {
        let colour = match line.chars().next() {
            Some('-') => "31",
            Some('+') => "32",
            _ => "33",
        };
        println!("  \x1b[{}m{}\x1b[0m", colour, line);
    }

    Ok(())
}

/// One `~`, `-` or `+` line per changed path
fn report(old: &Value, new: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    pair_visit(old, new, |path, a, b| match (a, b) {
        // identical subtrees need no further inspection
        (Slot::Defined(a), Slot::Defined(b)) if a == b => false,
        (Slot::Defined(a), Slot::Defined(b)) => {
            // containers of the same kind are reported through their members
            if shape(a) != shape(b) || shape(a) == Shape::Scalar {
                lines.push(format!("~ {}: {} -> {}", path, a, b));
            }
            true
        }
        (Slot::Defined(a), Slot::Undefined) => {
            lines.push(format!("- {}: {}", path, a));
            false
        }
        (Slot::Undefined, Slot::Defined(b)) => {
            lines.push(format!("+ {}: {}", path, b));
            false
        }
        (Slot::Undefined, Slot::Undefined) => unreachable!("never reported"),
    });
    lines
}

#[derive(PartialEq)]
enum Shape {
    Object,
    Array,
    Scalar,
}

fn shape(value: &Value) -> Shape {
    match value {
        Value::Object(_) => Shape::Object,
        Value::Array(_) => Shape::Array,
        _ => Shape::Scalar,
    }
}
