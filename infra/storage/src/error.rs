use std::borrow::Cow;

/// Errors of the blob store.
#[nodelock_derive::nodelock_error]
pub enum StorageError {
    /// The store directory is missing and the store was opened without `create`.
    #[error("Store directory not found{}: {message}", format_context(.context))]
    DirectoryNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Entry not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The target of a create-if-absent write already exists.
    #[error("Entry already exists{}: {message}", format_context(.context))]
    AlreadyExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The entry name is not a plain file name, or it resolves outside the store.
    #[error("Invalid entry{}: {message}", format_context(.context))]
    InvalidEntry { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Store I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
