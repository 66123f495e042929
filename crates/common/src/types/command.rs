use serde::{Deserialize, Serialize};

use super::ObjectId;

/// Commands sent to the execution backend.
///
/// Commands are fire-and-forget: the backend answers asynchronously with a
/// workbench event, and there is no cancellation primitive. A superseded
/// request is simply ignored when its answer arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BackendCommand {
    /// Request a metadata snapshot for one object
    GetObjectInfo {
        /// Identity of the object to describe
        object_id: ObjectId,
        /// Whether to include named attributes in the response
        include_attributes: bool,
        /// Whether to include exhaustive introspection results. The
        /// inspector always sends `false`; only named/visible attributes
        /// are ever requested.
        all_attributes: bool,
        /// Advisory rendering width hint, in cells
        frame_width: Option<u16>,
        /// Advisory rendering height hint, in cells
        frame_height: Option<u16>,
    },
    /// Request the program's toplevel variables
    GetGlobals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_tagged_on_the_wire() {
        let cmd = BackendCommand::GetObjectInfo {
            object_id: ObjectId(100),
            include_attributes: false,
            all_attributes: false,
            frame_width: Some(80),
            frame_height: None,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "get_object_info");
        assert_eq!(json["object_id"], 100);
        assert_eq!(json["all_attributes"], false);
    }
}
