// Loupe - Interactive Object Inspector
// Copyright (C) 2026 The Loupe Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! In-process execution backend serving a typed object heap.
//!
//! This backend plays the role the real execution backend plays in an IDE:
//! it owns the runtime values, answers `get_object_info`/`get_globals`
//! commands, and emits the corresponding workbench events. The demo binary
//! and the integration tests both run against it.

use std::collections::HashMap;

use loupe_common::{BackendCommand, ObjectId, ObjectInfo, ValueSummary, WorkbenchEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default cap on child descriptors per response when no frame hint is given
const DEFAULT_MAX_CHILDREN: usize = 1000;

/// A runtime value held in the local heap.
#[derive(Debug, Clone)]
pub enum Value {
    /// Python-style `None`
    NoneValue,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String; raw content is served via `string_content`
    Str(String),
    /// Ordered sequence with indices
    List(Vec<ObjectId>),
    /// Immutable ordered sequence with indices
    Tuple(Vec<ObjectId>),
    /// Unordered collection, no indices
    Set(Vec<ObjectId>),
    /// Mapping of key ids to value ids, in insertion order
    Dict(Vec<(ObjectId, ObjectId)>),
    /// Open text file handle
    File {
        /// File name shown in the repr
        name: String,
        /// Full file content; `None` models a backend-side read error
        content: Option<String>,
        /// Read position, in bytes
        tell: usize,
        /// Text encoding
        encoding: String,
        /// Read error message when `content` is `None`
        error: Option<String>,
    },
    /// Callable with retrievable source
    Function {
        /// Function name shown in the repr
        name: String,
        /// Source code
        source: String,
    },
    /// DataFrame-style table
    DataFrame {
        /// Column names
        columns: Vec<String>,
        /// Row index labels
        index: Vec<String>,
        /// Cell values, row-major
        values: Vec<Vec<String>>,
    },
    /// Encoded image
    Image {
        /// Image format name shown in the repr
        format: String,
        /// Base64 payload
        data: String,
    },
    /// A type object
    Type(String),
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Self::NoneValue => "NoneType".into(),
            Self::Bool(_) => "bool".into(),
            Self::Int(_) => "int".into(),
            Self::Float(_) => "float".into(),
            Self::Str(_) => "str".into(),
            Self::List(_) => "list".into(),
            Self::Tuple(_) => "tuple".into(),
            Self::Set(_) => "set".into(),
            Self::Dict(_) => "dict".into(),
            Self::File { .. } => "TextIOWrapper".into(),
            Self::Function { .. } => "function".into(),
            Self::DataFrame { .. } => "DataFrame".into(),
            Self::Image { .. } => "Image".into(),
            Self::Type(_) => "type".into(),
        }
    }
}

/// Object heap: values, their attributes, and the toplevel namespace.
#[derive(Debug, Default)]
pub struct Heap {
    values: HashMap<ObjectId, Value>,
    attributes: HashMap<ObjectId, Vec<(String, ObjectId)>>,
    globals: Vec<(String, ObjectId)>,
    type_ids: HashMap<String, ObjectId>,
    next_id: u64,
}

impl Heap {
    /// Create an empty heap
    pub fn new() -> Self {
        Self { next_id: 1, ..Self::default() }
    }

    /// Insert a value, assigning it a fresh id
    pub fn insert(&mut self, value: Value) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        // Intern the type object so type_id is always resolvable.
        self.ensure_type(&value.type_name());
        self.values.insert(id, value);
        id
    }

    /// Bind a toplevel variable name to a value
    pub fn set_global(&mut self, name: impl Into<String>, id: ObjectId) {
        self.globals.push((name.into(), id));
    }

    /// Attach a named attribute to a value
    pub fn set_attribute(&mut self, owner: ObjectId, name: impl Into<String>, value: ObjectId) {
        self.attributes.entry(owner).or_default().push((name.into(), value));
    }

    /// Id of the interned type object for `name`, creating it on first use
    pub fn ensure_type(&mut self, name: &str) -> ObjectId {
        if let Some(&id) = self.type_ids.get(name) {
            return id;
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.type_ids.insert(name.to_string(), id);
        self.values.insert(id, Value::Type(name.to_string()));
        // "type" is its own type; anything else needs the metatype interned
        if name != "type" {
            self.ensure_type("type");
        }
        id
    }

    /// Display repr of a value, recursing into children with a depth cap
    pub fn repr(&self, id: ObjectId) -> String {
        self.repr_depth(id, 2)
    }

    fn repr_depth(&self, id: ObjectId, depth: usize) -> String {
        let Some(value) = self.values.get(&id) else {
            return "<garbage>".into();
        };
        match value {
            Value::NoneValue => "None".into(),
            Value::Bool(true) => "True".into(),
            Value::Bool(false) => "False".into(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    format!("{x:.1}")
                } else {
                    x.to_string()
                }
            }
            Value::Str(s) => str_repr(s),
            Value::List(ids) => format!("[{}]", self.join_reprs(ids, depth)),
            Value::Tuple(ids) => match ids.len() {
                1 => format!("({},)", self.child_repr(ids[0], depth)),
                _ => format!("({})", self.join_reprs(ids, depth)),
            },
            Value::Set(ids) => {
                if ids.is_empty() {
                    "set()".into()
                } else {
                    format!("{{{}}}", self.join_reprs(ids, depth))
                }
            }
            Value::Dict(pairs) => {
                let body: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| {
                        format!("{}: {}", self.child_repr(*k, depth), self.child_repr(*v, depth))
                    })
                    .collect();
                format!("{{{}}}", body.join(", "))
            }
            Value::File { name, encoding, .. } => {
                format!("<_io.TextIOWrapper name={} encoding='{}'>", str_repr(name), encoding)
            }
            Value::Function { name, .. } => format!("<function {name}>"),
            Value::DataFrame { columns, index, .. } => {
                format!("<DataFrame: {} rows x {} columns>", index.len(), columns.len())
            }
            Value::Image { format, .. } => format!("<Image format={format}>"),
            Value::Type(name) => format!("<class '{name}'>"),
        }
    }

    fn child_repr(&self, id: ObjectId, depth: usize) -> String {
        if depth == 0 {
            "...".into()
        } else {
            self.repr_depth(id, depth - 1)
        }
    }

    fn join_reprs(&self, ids: &[ObjectId], depth: usize) -> String {
        let parts: Vec<String> = ids.iter().map(|&id| self.child_repr(id, depth)).collect();
        parts.join(", ")
    }

    fn summary(&self, id: ObjectId) -> ValueSummary {
        ValueSummary::new(id, self.repr(id))
    }

    /// Build the metadata snapshot for one object, or `None` when the id
    /// does not resolve.
    pub fn object_info(
        &self,
        object_id: ObjectId,
        include_attributes: bool,
        frame_height: Option<u16>,
    ) -> Option<ObjectInfo> {
        let value = self.values.get(&object_id)?;
        let type_name = value.type_name();
        let type_id = *self.type_ids.get(&type_name)?;
        let mut info = ObjectInfo::new(object_id, self.repr(object_id), type_name, type_id);

        // Frame hints are advisory: they only bound how many child rows we
        // bother describing.
        let cap = frame_height.map(|h| (h as usize).max(20)).unwrap_or(DEFAULT_MAX_CHILDREN);

        match value {
            Value::Str(s) => {
                info.string_content = Some(s.clone());
            }
            Value::List(ids) | Value::Tuple(ids) | Value::Set(ids) => {
                info.elements =
                    Some(ids.iter().take(cap).map(|&child| self.summary(child)).collect());
            }
            Value::Dict(pairs) => {
                info.entries = Some(
                    pairs
                        .iter()
                        .take(cap)
                        .map(|&(k, v)| (self.summary(k), self.summary(v)))
                        .collect(),
                );
            }
            Value::File { content, tell, encoding, error, .. } => {
                match content {
                    Some(content) => info.file_content = Some(content.clone()),
                    None => {
                        info.file_error =
                            Some(error.clone().unwrap_or_else(|| "read failed".into()));
                    }
                }
                info.file_tell = Some(*tell);
                info.file_encoding = Some(encoding.clone());
            }
            Value::Function { source, .. } => {
                info.source = Some(source.clone());
            }
            Value::DataFrame { columns, index, values } => {
                info.is_data_frame = true;
                info.columns = Some(columns.clone());
                info.row_count = Some(index.len());
                info.index = Some(index.iter().take(cap).cloned().collect());
                info.values = Some(values.iter().take(cap).cloned().collect());
            }
            Value::Image { data, .. } => {
                info.image_data = Some(data.clone());
            }
            Value::NoneValue
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Type(_) => {}
        }

        if include_attributes {
            if let Some(attrs) = self.attributes.get(&object_id) {
                for (name, attr_id) in attrs {
                    info.attributes.insert(name.clone(), self.summary(*attr_id));
                }
            }
        }

        Some(info)
    }

    /// Toplevel variables with value descriptors, in definition order
    pub fn globals(&self) -> Vec<(String, ValueSummary)> {
        self.globals.iter().map(|(name, id)| (name.clone(), self.summary(*id))).collect()
    }
}

/// Backend task answering commands against a [`Heap`].
#[derive(Debug)]
pub struct LocalBackend {
    heap: Heap,
}

impl LocalBackend {
    /// Create a backend over the given heap
    pub fn new(heap: Heap) -> Self {
        Self { heap }
    }

    /// Answer one command with the event it produces
    pub fn handle_command(&self, command: BackendCommand) -> WorkbenchEvent {
        match command {
            BackendCommand::GetObjectInfo {
                object_id,
                include_attributes,
                all_attributes: _,
                frame_width: _,
                frame_height,
            } => match self.heap.object_info(object_id, include_attributes, frame_height) {
                Some(info) => WorkbenchEvent::ObjectInfo { info, not_found: false },
                None => {
                    debug!("Object {} not resolvable", object_id);
                    WorkbenchEvent::ObjectInfo {
                        info: ObjectInfo::unresolved(object_id),
                        not_found: true,
                    }
                }
            },
            BackendCommand::GetGlobals => WorkbenchEvent::Globals { globals: self.heap.globals() },
        }
    }

    /// Run the backend: consume commands, publish answers on the bus.
    ///
    /// Emits `ToplevelResult` once at startup so the frontend knows the
    /// toplevel namespace is ready.
    pub fn spawn(
        self,
        mut commands: mpsc::UnboundedReceiver<BackendCommand>,
        events: mpsc::UnboundedSender<WorkbenchEvent>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if events.send(WorkbenchEvent::ToplevelResult).is_err() {
                return;
            }
            while let Some(command) = commands.recv().await {
                let event = self.handle_command(command);
                if events.send(event).is_err() {
                    warn!("Event bus closed, stopping local backend");
                    break;
                }
            }
        })
    }
}

/// Sample heap exercising every inspector view, used by the demo binary.
pub fn sample_heap() -> Heap {
    let mut heap = Heap::new();

    let greeting = heap.insert(Value::Str("Hello, world!\nSecond line".into()));
    let pi = heap.insert(Value::Float(3.14159));
    let count = heap.insert(Value::Int(42));
    let flag = heap.insert(Value::Bool(true));
    let nothing = heap.insert(Value::NoneValue);

    let one = heap.insert(Value::Int(1));
    let two = heap.insert(Value::Int(2));
    let three = heap.insert(Value::Int(3));
    let numbers = heap.insert(Value::List(vec![one, two, three]));
    let pair = heap.insert(Value::Tuple(vec![one, greeting]));
    let unique = heap.insert(Value::Set(vec![two, three]));

    let key_a = heap.insert(Value::Str("alpha".into()));
    let key_b = heap.insert(Value::Str("beta".into()));
    let mapping = heap.insert(Value::Dict(vec![(key_a, one), (key_b, numbers)]));

    let data_file = heap.insert(Value::File {
        name: "data.txt".into(),
        content: Some("first line\nsecond line\nthird line\n".into()),
        tell: 11,
        encoding: "utf-8".into(),
        error: None,
    });

    let func = heap.insert(Value::Function {
        name: "fib".into(),
        source: "def fib(n):\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\n"
            .into(),
    });

    let frame = heap.insert(Value::DataFrame {
        columns: vec!["name".into(), "score".into()],
        index: vec!["0".into(), "1".into(), "2".into()],
        values: vec![
            vec!["ada".into(), "95".into()],
            vec!["grace".into(), "88".into()],
            vec!["alan".into(), "91".into()],
        ],
    });

    let logo = heap.insert(Value::Image {
        format: "gif".into(),
        data: "R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==".into(),
    });

    let fib_name = heap.insert(Value::Str("fib".into()));
    heap.set_attribute(func, "__name__", fib_name);
    let file_encoding = heap.insert(Value::Str("utf-8".into()));
    heap.set_attribute(data_file, "encoding", file_encoding);
    heap.set_attribute(frame, "columns", numbers);

    heap.set_global("greeting", greeting);
    heap.set_global("pi", pi);
    heap.set_global("count", count);
    heap.set_global("flag", flag);
    heap.set_global("nothing", nothing);
    heap.set_global("numbers", numbers);
    heap.set_global("pair", pair);
    heap.set_global("unique", unique);
    heap.set_global("mapping", mapping);
    heap.set_global("data_file", data_file);
    heap.set_global("fib", func);
    heap.set_global("frame", frame);
    heap.set_global("logo", logo);

    heap
}

/// Render a string the way a repr would: single quotes, standard escapes.
fn str_repr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_info(heap: &Heap, id: ObjectId) -> ObjectInfo {
        heap.object_info(id, false, None).expect("object should resolve")
    }

    #[test]
    fn str_info_carries_raw_content() {
        let mut heap = Heap::new();
        let id = heap.insert(Value::Str("hi".into()));

        let info = str_info(&heap, id);
        assert_eq!(info.type_name, "str");
        assert_eq!(info.repr, "'hi'");
        assert_eq!(info.string_content.as_deref(), Some("hi"));
    }

    #[test]
    fn list_info_carries_elements() {
        let mut heap = Heap::new();
        let a = heap.insert(Value::Int(1));
        let b = heap.insert(Value::Int(2));
        let list = heap.insert(Value::List(vec![a, b]));

        let info = str_info(&heap, list);
        let elements = info.elements.unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], ValueSummary::new(a, "1"));
        assert_eq!(info.repr, "[1, 2]");
        assert!(info.entries.is_none());
    }

    #[test]
    fn dict_info_carries_entries() {
        let mut heap = Heap::new();
        let k = heap.insert(Value::Str("a".into()));
        let v = heap.insert(Value::Int(7));
        let dict = heap.insert(Value::Dict(vec![(k, v)]));

        let info = str_info(&heap, dict);
        let entries = info.entries.unwrap();
        assert_eq!(entries, vec![(ValueSummary::new(k, "'a'"), ValueSummary::new(v, "7"))]);
        assert_eq!(info.repr, "{'a': 7}");
    }

    #[test]
    fn broken_file_reports_error_without_content() {
        let mut heap = Heap::new();
        let id = heap.insert(Value::File {
            name: "gone.txt".into(),
            content: None,
            tell: 0,
            encoding: "utf-8".into(),
            error: Some("file closed".into()),
        });

        let info = str_info(&heap, id);
        assert!(info.is_file_like());
        assert!(info.file_content.is_none());
        assert_eq!(info.file_error.as_deref(), Some("file closed"));
    }

    #[test]
    fn attributes_only_when_requested() {
        let mut heap = Heap::new();
        let name = heap.insert(Value::Str("f".into()));
        let func = heap.insert(Value::Function { name: "f".into(), source: "def f(): pass".into() });
        heap.set_attribute(func, "__name__", name);

        let without = heap.object_info(func, false, None).unwrap();
        assert!(without.attributes.is_empty());

        let with = heap.object_info(func, true, None).unwrap();
        assert_eq!(with.attributes.get("__name__"), Some(&ValueSummary::new(name, "'f'")));
    }

    #[test]
    fn unknown_id_yields_not_found_event() {
        let backend = LocalBackend::new(Heap::new());
        let event = backend.handle_command(BackendCommand::GetObjectInfo {
            object_id: ObjectId(999),
            include_attributes: false,
            all_attributes: false,
            frame_width: None,
            frame_height: None,
        });
        match event {
            WorkbenchEvent::ObjectInfo { info, not_found } => {
                assert!(not_found);
                assert_eq!(info.id, ObjectId(999));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn frame_height_caps_children() {
        let mut heap = Heap::new();
        let children: Vec<ObjectId> =
            (0..100).map(|n| heap.insert(Value::Int(n))).collect();
        let list = heap.insert(Value::List(children));

        let info = heap.object_info(list, false, Some(30)).unwrap();
        assert_eq!(info.elements.unwrap().len(), 30);
    }

    #[test]
    fn type_objects_are_interned() {
        let mut heap = Heap::new();
        let a = heap.insert(Value::Int(1));
        let b = heap.insert(Value::Int(2));

        let info_a = heap.object_info(a, false, None).unwrap();
        let info_b = heap.object_info(b, false, None).unwrap();
        assert_eq!(info_a.type_id, info_b.type_id);

        let type_info = heap.object_info(info_a.type_id, false, None).unwrap();
        assert_eq!(type_info.repr, "<class 'int'>");
        assert_eq!(type_info.type_name, "type");
    }

    #[test]
    fn sample_heap_resolves_every_global() {
        let heap = sample_heap();
        for (name, summary) in heap.globals() {
            assert!(
                heap.object_info(summary.id, true, None).is_some(),
                "global {name} does not resolve"
            );
        }
    }

    #[test]
    fn reprs_follow_literal_grammar() {
        let mut heap = Heap::new();
        let s = heap.insert(Value::Str("it's\nfine".into()));
        assert_eq!(heap.repr(s), "'it\\'s\\nfine'");

        let single = heap.insert(Value::Tuple(vec![s]));
        assert_eq!(heap.repr(single), "('it\\'s\\nfine',)");

        let empty = heap.insert(Value::Set(vec![]));
        assert_eq!(heap.repr(empty), "set()");
    }
}
