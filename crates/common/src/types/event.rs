use serde::{Deserialize, Serialize};

use super::{ObjectId, ObjectInfo, ValueSummary};

/// Events published on the workbench event bus.
///
/// The bus is the only inbound surface of the inspector: object selections,
/// backend responses, and execution-progress signals all arrive as events.
/// Panels never block waiting for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkbenchEvent {
    /// A value was chosen for inspection (from any view)
    ObjectSelect {
        /// Identity of the chosen value
        object_id: ObjectId,
    },
    /// Backend response to a `get_object_info` command
    ObjectInfo {
        /// The metadata snapshot; reduced to its `id` when not found
        info: ObjectInfo,
        /// The backend could not resolve the id (object collected or
        /// identifier invalid)
        #[serde(default)]
        not_found: bool,
    },
    /// Backend response to a `get_globals` command
    Globals {
        /// Toplevel variable names with value descriptors, in definition order
        globals: Vec<(String, ValueSummary)>,
    },
    /// The debugger advanced; cached object state may be stale
    DebuggerProgress,
    /// A toplevel program run finished
    ToplevelResult,
    /// The inspector view became visible
    ShowView,
    /// The inspector view was hidden
    HideView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_flag_defaults_to_false() {
        let json = serde_json::json!({
            "event": "object_info",
            "info": {"id": 3, "repr": "7", "type": "int", "type_id": 1},
        });
        let event: WorkbenchEvent = serde_json::from_value(json).unwrap();
        match event {
            WorkbenchEvent::ObjectInfo { info, not_found } => {
                assert_eq!(info.id, ObjectId(3));
                assert!(!not_found);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
