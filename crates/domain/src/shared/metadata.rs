use std::collections::HashMap;

/// Free form key value pairs attached by upstream collaborators,
/// e.g. `pdfId` on an assignment created from an uploaded PDF.
pub type Metadata = HashMap<String, String>;

pub trait Meta {
    fn metadata(&self) -> &Metadata;

    fn has_metadata(&self, key: &str, value: &str) -> bool {
        matches!(self.metadata().get(key), Some(v) if v == value)
    }
}
