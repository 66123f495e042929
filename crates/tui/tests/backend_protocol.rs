//! Integration tests for the command/event protocol against the local backend.

use loupe_common::{BackendCommand, ObjectId, WorkbenchEvent};
use loupe_tui::{sample_heap, BackendHandle, LocalBackend};
use tokio::sync::mpsc;

struct Harness {
    backend: BackendHandle,
    events: mpsc::UnboundedReceiver<WorkbenchEvent>,
}

impl Harness {
    fn start() -> Self {
        loupe_common::logging::ensure_test_logging(None);
        let (backend, commands) = BackendHandle::channel();
        let (bus, events) = mpsc::unbounded_channel();
        LocalBackend::new(sample_heap()).spawn(commands, bus);
        Self { backend, events }
    }

    async fn next_event(&mut self) -> WorkbenchEvent {
        self.events.recv().await.expect("backend closed the bus")
    }

    async fn globals(&mut self) -> Vec<(String, loupe_common::ValueSummary)> {
        self.backend.get_globals();
        loop {
            match self.next_event().await {
                WorkbenchEvent::Globals { globals } => return globals,
                _ => continue,
            }
        }
    }

    async fn info_for(&mut self, id: ObjectId, include_attributes: bool) -> (loupe_common::ObjectInfo, bool) {
        self.backend.get_object_info(id, include_attributes, None, None);
        loop {
            match self.next_event().await {
                WorkbenchEvent::ObjectInfo { info, not_found } => return (info, not_found),
                _ => continue,
            }
        }
    }

    async fn lookup(&mut self, name: &str) -> ObjectId {
        self.globals()
            .await
            .into_iter()
            .find(|(global, _)| global == name)
            .map(|(_, summary)| summary.id)
            .unwrap_or_else(|| panic!("no global named {name}"))
    }
}

#[tokio::test]
async fn backend_announces_the_toplevel_on_startup() {
    let mut harness = Harness::start();
    assert!(matches!(
        harness.next_event().await,
        WorkbenchEvent::ToplevelResult
    ));
}

#[tokio::test]
async fn globals_list_the_sample_bindings() {
    let mut harness = Harness::start();
    let globals = harness.globals().await;
    let names: Vec<&str> = globals.iter().map(|(name, _)| name.as_str()).collect();

    for expected in ["greeting", "numbers", "mapping", "data_file", "fib", "frame", "logo"] {
        assert!(names.contains(&expected), "missing global {expected}");
    }
}

#[tokio::test]
async fn list_objects_come_back_with_elements() {
    let mut harness = Harness::start();
    let id = harness.lookup("numbers").await;
    let (info, not_found) = harness.info_for(id, false).await;

    assert!(!not_found);
    assert_eq!(info.type_name, "list");
    let elements = info.elements.expect("list should carry elements");
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].repr, "1");
}

#[tokio::test]
async fn dict_objects_come_back_with_entries() {
    let mut harness = Harness::start();
    let id = harness.lookup("mapping").await;
    let (info, _) = harness.info_for(id, false).await;

    assert_eq!(info.type_name, "dict");
    let entries = info.entries.expect("dict should carry entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0.repr, "'alpha'");
}

#[tokio::test]
async fn strings_ship_their_raw_content() {
    let mut harness = Harness::start();
    let id = harness.lookup("greeting").await;
    let (info, _) = harness.info_for(id, false).await;

    assert_eq!(info.type_name, "str");
    assert_eq!(info.string_content.as_deref(), Some("Hello, world!\nSecond line"));
}

#[tokio::test]
async fn file_objects_report_read_position() {
    let mut harness = Harness::start();
    let id = harness.lookup("data_file").await;
    let (info, _) = harness.info_for(id, false).await;

    assert!(info.is_file_like());
    assert_eq!(info.file_tell, Some(11));
    assert!(info.file_content.unwrap().starts_with("first line\n"));
}

#[tokio::test]
async fn attributes_arrive_only_on_request() {
    let mut harness = Harness::start();
    let id = harness.lookup("fib").await;

    let (plain, _) = harness.info_for(id, false).await;
    assert!(plain.attributes.is_empty());

    let (with_atts, _) = harness.info_for(id, true).await;
    assert!(with_atts.attributes.contains_key("__name__"));
    assert!(with_atts.source.is_some());
}

#[tokio::test]
async fn unknown_objects_are_flagged_not_found() {
    let mut harness = Harness::start();
    let bogus = ObjectId(0xdead_beef);
    let (info, not_found) = harness.info_for(bogus, false).await;

    assert!(not_found);
    assert_eq!(info.id, bogus);
}

#[tokio::test]
async fn type_ids_resolve_to_type_objects() {
    let mut harness = Harness::start();
    let id = harness.lookup("count").await;
    let (info, _) = harness.info_for(id, false).await;
    assert_eq!(info.type_name, "int");

    // following the type link lands on the interned type object
    let (type_info, not_found) = harness.info_for(info.type_id, false).await;
    assert!(!not_found);
    assert_eq!(type_info.type_name, "type");
}
