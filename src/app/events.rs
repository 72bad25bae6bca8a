//! Messages flowing from the combobox callback back to the demo host.

use crate::app::state::SelectionRecord;
use crate::ui::components::shared::now_unix_ms;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Message sent by the combobox selection callback.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum HostMessage {
    Selected(SelectionRecord),
}

/// Builds the `on_select` callback used by the demo: logs the choice and
/// forwards it to the host loop.
pub fn selection_callback(tx: UnboundedSender<HostMessage>) -> impl FnMut(&str) + 'static {
    move |value: &str| {
        info!(selection = %value, "demo received selection");
        let record = SelectionRecord {
            value: value.to_owned(),
            at_unix_ms: now_unix_ms(),
        };
        if tx.send(HostMessage::Selected(record)).is_err() {
            warn!("selection dropped: host loop has stopped");
        }
    }
}
