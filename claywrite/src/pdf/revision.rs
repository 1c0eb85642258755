use super::{
    trailer::{K_ENCRYPT, K_INFO, K_ROOT},
    Dictionary, IndirectObject, Name, Object, Reference,
};

/// One append-only generation of a document's objects plus its trailer.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    objects: Vec<IndirectObject>,
    trailer: Dictionary,
    next_free: u32,
}

impl Default for Revision {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            trailer: Dictionary::default(),
            // object 0 is reserved for the head of the free list
            next_free: 1,
        }
    }
}

impl Revision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailer(trailer: Dictionary) -> Self {
        Self {
            trailer,
            ..Self::default()
        }
    }

    pub fn push(&mut self, object: IndirectObject) {
        self.next_free = self.next_free.max(object.id.number.saturating_add(1));
        self.objects.push(object);
    }

    /// The objects of this revision in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &IndirectObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, number: u32) -> Option<&IndirectObject> {
        self.objects.iter().find(|o| o.id.number == number)
    }

    /// A copy of the trailer that the writer can complete.
    pub fn trailer(&self) -> Dictionary {
        self.trailer.clone()
    }

    pub fn trailer_ref(&self) -> &Dictionary {
        &self.trailer
    }

    pub fn trailer_mut(&mut self) -> &mut Dictionary {
        &mut self.trailer
    }

    pub fn set_root(&mut self, root: Reference) {
        self.trailer.insert(Name::from(K_ROOT), Object::from(root));
    }

    pub fn set_info(&mut self, info: Reference) {
        self.trailer.insert(Name::from(K_INFO), Object::from(info));
    }

    pub fn set_encrypt(&mut self, encrypt: Reference) {
        self.trailer.insert(Name::from(K_ENCRYPT), Object::from(encrypt));
    }

    /// One above the highest object number used in this revision.
    pub fn next_free_number(&self) -> u32 {
        self.next_free
    }
}

impl Extend<IndirectObject> for Revision {
    fn extend<T: IntoIterator<Item = IndirectObject>>(&mut self, iter: T) {
        for object in iter {
            self.push(object);
        }
    }
}
