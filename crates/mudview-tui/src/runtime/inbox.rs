use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Sender half of the runtime's event inbox. Cloned into background tasks.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver half, drained by the runtime once per loop iteration.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
