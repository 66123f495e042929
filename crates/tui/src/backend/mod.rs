//! Command channel to the execution backend
//!
//! The backend runs as a cooperating task/process: the frontend sends it
//! structured commands and the backend answers later with workbench events.
//! Nothing here blocks, and a command cannot be retracted once sent; a
//! superseded answer is discarded by the receiving panel instead.

pub mod local;

pub use local::{sample_heap, Heap, LocalBackend, Value};

use loupe_common::{BackendCommand, ObjectId};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Client side of the backend command channel.
#[derive(Debug, Clone)]
pub struct BackendHandle {
    commands: mpsc::UnboundedSender<BackendCommand>,
}

impl BackendHandle {
    /// Wrap an existing command sender
    pub fn new(commands: mpsc::UnboundedSender<BackendCommand>) -> Self {
        Self { commands }
    }

    /// Create a handle together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BackendCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Request a metadata snapshot for one object.
    ///
    /// `all_attributes` is always false: only named/visible attributes are
    /// ever requested, never exhaustive introspection. The frame dimensions
    /// are advisory rendering hints.
    pub fn get_object_info(
        &self,
        object_id: ObjectId,
        include_attributes: bool,
        frame_width: Option<u16>,
        frame_height: Option<u16>,
    ) {
        self.send(BackendCommand::GetObjectInfo {
            object_id,
            include_attributes,
            all_attributes: false,
            frame_width,
            frame_height,
        });
    }

    /// Request the program's toplevel variables
    pub fn get_globals(&self) {
        self.send(BackendCommand::GetGlobals);
    }

    fn send(&self, command: BackendCommand) {
        debug!("Sending backend command: {:?}", command);
        if self.commands.send(command).is_err() {
            // The backend going away is not fatal for the panel; it just
            // stops getting answers.
            warn!("Backend command channel closed, command dropped");
        }
    }
}
