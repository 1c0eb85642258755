use thiserror::Error;

/// Errors that abort writing a document.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("invalid revision layout: {0}")]
    Config(#[from] ConfigError),

    /// The chosen xref encoding cannot express this entry. Points to a bug in
    /// the layout planner, not to bad input.
    #[error("xref entry for object {number} cannot be written to a classic xref table")]
    UnexpectedXrefEntry { number: u32 },

    #[error("object stream {number} was not packed before writing")]
    UnpackedObjectStream { number: u32 },

    #[error("value {0} does not fit into a PDF integer")]
    IntegerOverflow(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inconsistent object placement inside a single revision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("object streams require a cross-reference stream object in the same revision")]
    ObjectStreamsWithoutXrefStream,

    #[error("object stream {container} lists object {member} which is not part of the revision")]
    MissingMember { container: u32, member: u32 },

    #[error("object {member} cannot be stored in object stream {container}")]
    InvalidMember { container: u32, member: u32 },

    #[error("object {member} is claimed by object streams {first} and {second}")]
    DuplicateMember { member: u32, first: u32, second: u32 },
}
