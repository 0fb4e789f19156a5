use crate::document::LoadedDocument;
use crate::search::FilteredResult;

/// Process-lifetime state behind the two views.
/// A new document always replaces the old one wholesale and drops the filtered view.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Option<LoadedDocument>,
    filtered: Option<FilteredResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn filtered(&self) -> Option<&FilteredResult> {
        self.filtered.as_ref()
    }

    pub fn replace_document(&mut self, document: LoadedDocument) -> &LoadedDocument {
        self.filtered = None;
        self.document.insert(document)
    }

    pub fn set_filtered(&mut self, filtered: FilteredResult) -> &FilteredResult {
        self.filtered.insert(filtered)
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.filtered = None;
    }
}
