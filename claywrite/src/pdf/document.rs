use super::Revision;

/// A PDF document as a sequence of revisions, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) version: (u8, u8),
    revisions: Vec<Revision>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new((1, 7))
    }
}

impl Document {
    pub fn new(version: (u8, u8)) -> Self {
        Self {
            version,
            revisions: Vec::new(),
        }
    }

    pub fn version(&self) -> (u8, u8) {
        self.version
    }

    pub fn push_revision(&mut self, revision: Revision) {
        self.revisions.push(revision);
    }

    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// The newest revision, new objects are usually added there.
    pub fn last_revision_mut(&mut self) -> Option<&mut Revision> {
        self.revisions.last_mut()
    }
}

impl From<Vec<Revision>> for Document {
    fn from(revisions: Vec<Revision>) -> Self {
        Self {
            revisions,
            ..Self::default()
        }
    }
}
