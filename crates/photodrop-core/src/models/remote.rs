//! Remote object model: what the storage provider reports back after an upload.

use serde::{Deserialize, Serialize};

/// An object created in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteObject {
    /// Provider-assigned identifier
    pub id: String,
    /// Generated remote name (`<millis>-<filename>`)
    pub name: String,
    /// Parent container the object was created under
    pub parent_id: String,
    /// Shareable view link, when the provider returns one
    pub web_view_link: Option<String>,
}
