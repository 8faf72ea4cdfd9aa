//! `vartree` CLI: load JSON into a value tree, dump it, and query typed values.
//!
//! ## Usage
//!
//! ```sh
//! # Dump a JSON document as an indented tree (stdin → stdout)
//! echo '{"cmd":{"log":{"level":9}}}' | vartree dump
//!
//! # Read one value by key path
//! vartree get -i config.json cmd log level
//!
//! # Read it through a typed accessor (string payloads are parsed)
//! vartree get -i config.json --as uint16 server port
//!
//! # Re-emit the tree's own serialization as pretty JSON
//! vartree json -i config.json -o tree.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use vartree::{Kind, Node, Value};

#[derive(Parser)]
#[command(
    name = "vartree",
    version,
    about = "Load JSON into a vartree and query typed values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every node as `d[key] = value`, indented by depth
    Dump {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the value stored at a key path
    Get {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Extract through the accessor for this kind (e.g. "int32", "double")
        #[arg(long = "as", value_name = "KIND")]
        as_kind: Option<String>,
        /// Keys to follow from the root; array elements are addressed by index
        #[arg(required = true)]
        path: Vec<String>,
    },
    /// Print the tree's serialization as pretty JSON
    Json {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { input, output } => {
            let tree = load_tree(input.as_deref())?;
            write_output(output.as_deref(), &tree.dump())?;
        }
        Commands::Get {
            input,
            as_kind,
            path,
        } => {
            let tree = load_tree(input.as_deref())?;
            let node = resolve_path(&tree, &path)?;
            let rendered = match as_kind.as_deref() {
                Some(name) => {
                    let kind = Kind::from_name(name).with_context(|| {
                        format!("Unknown kind: '{}'. Available kinds: {}", name, kind_names())
                    })?;
                    extract(node.value(), kind)
                        .with_context(|| format!("Failed to read {} as {}", path.join("."), kind))?
                }
                None => node.value().to_string(),
            };
            println!("{}", rendered);
        }
        Commands::Json { input, output } => {
            let tree = load_tree(input.as_deref())?;
            let pretty =
                serde_json::to_string_pretty(&tree).context("Failed to serialize tree to JSON")?;
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

fn load_tree(input: Option<&str>) -> Result<Node> {
    let json = read_input(input)?;
    let value: serde_json::Value = serde_json::from_str(&json).context("Failed to parse JSON")?;
    Ok(json_to_node(&value))
}

/// Build a tree from a JSON value.
///
/// - `null` → empty, `bool` → bool, strings → string
/// - integers → `int64`, or `uint64` when only unsigned fits; other numbers → `double`
/// - arrays of strings → string list; other arrays → children keyed by `uint64` index
/// - objects → children keyed by string
fn json_to_node(json: &serde_json::Value) -> Node {
    use serde_json::Value as Json;

    match json {
        Json::Null => Node::new(),
        Json::Bool(b) => Node::from(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::from(i)
            } else if let Some(u) = n.as_u64() {
                Node::from(u)
            } else {
                Node::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Node::from(s.as_str()),
        Json::Array(items) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            match strings {
                Some(list) => Node::from(list),
                None => {
                    let mut node = Node::new();
                    for (i, item) in items.iter().enumerate() {
                        node.insert(i as u64, json_to_node(item));
                    }
                    node
                }
            }
        }
        Json::Object(map) => {
            let mut node = Node::new();
            for (key, item) in map {
                node.insert(key.as_str(), json_to_node(item));
            }
            node
        }
    }
}

/// Follow `path` from the root. Each segment is tried as a string key
/// first, then as an array index.
fn resolve_path<'a>(tree: &'a Node, path: &[String]) -> Result<&'a Node> {
    let mut node = tree;
    for segment in path {
        node = match node.get(segment) {
            Some(child) => child,
            None => match segment.parse::<u64>().ok().and_then(|i| node.get(i)) {
                Some(child) => child,
                None => {
                    node.at(segment)
                        .with_context(|| format!("Failed to resolve path: {}", path.join(".")))?
                }
            },
        };
    }
    Ok(node)
}

/// Render `value` through the typed accessor for `kind`.
fn extract(value: &Value, kind: Kind) -> vartree::Result<String> {
    Ok(match kind {
        Kind::Empty => {
            if value.is_empty() {
                value.to_string()
            } else {
                return Err(vartree::VarError::TypeMismatch {
                    expected: Kind::Empty,
                    found: value.kind(),
                });
            }
        }
        Kind::Bool => value.as_bool()?.to_string(),
        Kind::Int8 => value.as_int8()?.to_string(),
        Kind::UInt8 => value.as_uint8()?.to_string(),
        Kind::Int16 => value.as_int16()?.to_string(),
        Kind::UInt16 => value.as_uint16()?.to_string(),
        Kind::Int32 => value.as_int32()?.to_string(),
        Kind::UInt32 => value.as_uint32()?.to_string(),
        Kind::Int64 => value.as_int64()?.to_string(),
        Kind::UInt64 => value.as_uint64()?.to_string(),
        Kind::Float => format!("{:.6}", value.as_float()?),
        Kind::Double => format!("{:.6}", value.as_double()?),
        Kind::ExtendedFloat => format!("{:.6}", value.as_extended()?),
        Kind::String => value.as_string()?.to_string(),
        Kind::StringList => value.as_string_list()?.join("\n"),
    })
}

fn kind_names() -> String {
    Kind::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_map_to_kinds() {
        assert_eq!(json_to_node(&json!(null)).value().kind(), Kind::Empty);
        assert_eq!(json_to_node(&json!(true)).value().kind(), Kind::Bool);
        assert_eq!(json_to_node(&json!(-3)).value().kind(), Kind::Int64);
        assert_eq!(json_to_node(&json!(u64::MAX)).value().kind(), Kind::UInt64);
        assert_eq!(json_to_node(&json!(0.5)).value().kind(), Kind::Double);
        assert_eq!(json_to_node(&json!("x")).value().kind(), Kind::String);
    }

    #[test]
    fn json_arrays() {
        let tags = json_to_node(&json!(["a", "b"]));
        assert_eq!(tags.value().to_string(), "a,b");
        assert!(tags.is_leaf());

        let mixed = json_to_node(&json!([1, "two"]));
        assert!(mixed.value().is_empty());
        assert_eq!(mixed[0u64].value().as_int64().unwrap(), 1);
        assert_eq!(mixed[1u64].value().as_string().unwrap(), "two");
    }

    #[test]
    fn path_segments_fall_back_to_indices() {
        let tree = json_to_node(&json!({"servers": [{"port": 80}, {"port": 443}]}));
        let path: Vec<String> = ["servers", "1", "port"].iter().map(|s| s.to_string()).collect();
        let node = resolve_path(&tree, &path).unwrap();
        assert_eq!(node.value().as_int64().unwrap(), 443);
    }

    #[test]
    fn extract_uses_typed_accessors() {
        assert_eq!(extract(&Value::from("42"), Kind::UInt8).unwrap(), "42");
        assert!(extract(&Value::from("300"), Kind::UInt8).is_err());
        assert!(extract(&Value::from(1i64), Kind::Empty).is_err());
        assert_eq!(extract(&Value::from("0.75"), Kind::Double).unwrap(), "0.750000");
    }
}
