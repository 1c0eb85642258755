use fnv::FnvHashMap;

/// References to objects inside a PDF section.
///
/// References in this table mark object numbers either as used or unused.
/// Unused object numbers may be reused for new objects. Used objects are
/// divided into two groups compressed and uncompressed objects. Uncompressed
/// objects can be immediately accessed at the given byte offset while
/// compressed objects are contained inside an object stream.
///
/// Entries are keyed by object number, a second entry for the same number
/// replaces the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Xref {
    entries: FnvHashMap<u32, XrefEntry>,
}

/// A run of consecutive object numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsection<'a> {
    pub start: u32,
    pub entries: Vec<&'a XrefEntry>,
}

impl Xref {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index that already contains the head of the free list, object 0
    /// with generation 65535.
    pub fn with_free_head() -> Self {
        let mut xref = Self::new();
        xref.insert(
            FreeObject {
                number: 0,
                generation: FREE_HEAD_GENERATION,
                next_free: 0,
            }
            .into(),
        );
        xref
    }

    pub fn add_free(&mut self, number: u32, generation: u16) {
        self.insert(
            FreeObject {
                number,
                generation,
                next_free: 0,
            }
            .into(),
        );
    }

    pub fn add_used(&mut self, number: u32, generation: u16, byte_offset: usize) {
        self.insert(
            UsedObject {
                number,
                byte_offset,
                generation,
            }
            .into(),
        );
    }

    pub fn add_compressed(&mut self, number: u32, containing_object: u32, index: usize) {
        self.insert(
            UsedCompressedObject {
                number,
                containing_object,
                index,
            }
            .into(),
        );
    }

    fn insert(&mut self, entry: XrefEntry) {
        if let Some(old) = self.entries.insert(entry.number(), entry) {
            log::trace!("replaced xref entry for object {}", old.number());
        }
    }

    pub fn get(&self, number: u32) -> Option<&XrefEntry> {
        self.entries.get(&number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn highest_number(&self) -> Option<u32> {
        self.entries.keys().copied().max()
    }

    /// All entries, ordered by object number.
    pub fn entries(&self) -> Vec<&XrefEntry> {
        let mut entries: Vec<&XrefEntry> = self.entries.values().collect();
        entries.sort_unstable_by_key(|e| e.number());
        entries
    }

    /// Split the entries into maximal runs of consecutive object numbers.
    pub fn subsections(&self) -> Vec<Subsection<'_>> {
        let mut subsections: Vec<Subsection<'_>> = Vec::new();
        for entry in self.entries() {
            match subsections.last_mut() {
                Some(sub) if sub.start as usize + sub.entries.len() == entry.number() as usize => {
                    sub.entries.push(entry)
                }
                _ => subsections.push(Subsection {
                    start: entry.number(),
                    entries: vec![entry],
                }),
            }
        }
        subsections
    }

    /// Thread the free entries into a list ordered by object number.
    ///
    /// The last free entry points back to object 0.
    pub fn link_free_list(&mut self) {
        let mut free: Vec<u32> = self
            .entries
            .values()
            .filter(|e| matches!(e, XrefEntry::Free(_)))
            .map(XrefEntry::number)
            .collect();
        free.sort_unstable();

        let next = free.iter().skip(1).copied().chain(std::iter::once(0));
        for (number, next_free) in free.iter().zip(next) {
            if let Some(XrefEntry::Free(entry)) = self.entries.get_mut(number) {
                entry.next_free = next_free;
            }
        }
    }

    pub fn used_objects(&self) -> impl Iterator<Item = &UsedObject> {
        self.entries()
            .into_iter()
            .filter_map(|entry| if let XrefEntry::Used(u) = entry { Some(u) } else { None })
    }

    pub fn compressed_objects(&self) -> impl Iterator<Item = &UsedCompressedObject> {
        self.entries().into_iter().filter_map(|entry| {
            if let XrefEntry::UsedCompressed(u) = entry {
                Some(u)
            } else {
                None
            }
        })
    }

    pub fn free_objects(&self) -> impl Iterator<Item = &FreeObject> {
        self.entries()
            .into_iter()
            .filter_map(|entry| if let XrefEntry::Free(u) = entry { Some(u) } else { None })
    }
}

/// Generation of the free list head, object 0.
pub const FREE_HEAD_GENERATION: u16 = 65535;

#[derive(Debug, Clone, PartialEq)]
pub struct FreeObject {
    /// Number of this object
    pub number: u32,
    /// Next generation number that should be used
    pub generation: u16,
    /// Next free object number
    pub next_free: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedObject {
    /// Number of this object
    pub number: u32,
    /// The position of this object in the pdf file in bytes, starting from the
    /// beginning of the PDF.
    pub byte_offset: usize,
    pub generation: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedCompressedObject {
    /// Number of this object
    pub number: u32,
    /// The number of the stream object that contains this object
    pub containing_object: u32,
    /// Position of this object inside the object stream
    pub index: usize,
}

/// Denotes a free object reference in a xref stream.
pub const XREF_FREE: usize = 0;
/// Denotes a used object reference in a xref stream.
pub const XREF_USED: usize = 1;
/// Denotes a used and compressed object reference in a xref stream.
pub const XREF_COMPRESSED: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum XrefEntry {
    Free(FreeObject),
    Used(UsedObject),
    /// Object is stored in compressed stream
    UsedCompressed(UsedCompressedObject),
}

impl XrefEntry {
    pub fn type_num(&self) -> usize {
        match self {
            XrefEntry::Free(_) => XREF_FREE,
            XrefEntry::Used(_) => XREF_USED,
            XrefEntry::UsedCompressed(_) => XREF_COMPRESSED,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            XrefEntry::Free(FreeObject { number, .. }) => *number,
            XrefEntry::Used(UsedObject { number, .. }) => *number,
            XrefEntry::UsedCompressed(UsedCompressedObject { number, .. }) => *number,
        }
    }

    /// The three fields of this entry as written to a xref stream.
    pub fn fields(&self) -> [usize; 3] {
        let type_num = self.type_num();
        match self {
            XrefEntry::Free(e) => [type_num, e.next_free as usize, e.generation.into()],
            XrefEntry::Used(e) => [type_num, e.byte_offset, e.generation.into()],
            XrefEntry::UsedCompressed(e) => [type_num, e.containing_object as usize, e.index],
        }
    }
}

impl From<UsedCompressedObject> for XrefEntry {
    fn from(v: UsedCompressedObject) -> Self {
        Self::UsedCompressed(v)
    }
}

impl From<UsedObject> for XrefEntry {
    fn from(v: UsedObject) -> Self {
        Self::Used(v)
    }
}

impl From<FreeObject> for XrefEntry {
    fn from(v: FreeObject) -> Self {
        Self::Free(v)
    }
}
