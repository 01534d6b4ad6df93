use std::borrow::Cow;

/// Why a single attribute probe produced no value.
///
/// Probe errors never escape fingerprinting; they are logged and replaced by the sentinel.
#[nodelock_derive::nodelock_error]
pub enum ProbeError {
    /// The attribute does not exist on this platform or machine.
    #[error("Attribute unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Probe I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Machine id failure{}: {message}", format_context(.context))]
    MachineId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
