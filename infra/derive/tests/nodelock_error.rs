use nodelock_derive::nodelock_error;
use std::borrow::Cow;

#[nodelock_error]
pub enum ProbeError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Unsupported platform{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<Vec<u8>, ProbeError> {
    std::fs::read("/definitely/not/here/nodelock").context("reading dmi table")
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().unwrap_err();

    assert!(matches!(&err, ProbeError::Io { context: Some(c), .. } if c == "reading dmi table"));
    assert!(err.to_string().starts_with("I/O failure (reading dmi table): "));
}

#[test]
fn context_is_attached_to_own_variants() {
    let result: Result<(), ProbeError> =
        Err(ProbeError::Unsupported { message: "tpm".into(), context: None });

    let err = result.context("windows").unwrap_err();
    assert_eq!(err.to_string(), "Unsupported platform (windows): tpm");
}

#[test]
fn strings_become_internal_errors() {
    let err: ProbeError = "boom".into();
    assert_eq!(err.to_string(), "Internal probe error: boom");

    let err: ProbeError = format!("code {}", 7).into();
    assert!(matches!(err, ProbeError::Internal { .. }));
}

#[test]
fn from_impl_leaves_context_empty() {
    let err: ProbeError = std::io::Error::other("disk").into();
    assert_eq!(err.to_string(), "I/O failure: disk");
}

#[test]
fn nodelock_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/nodelock_error_pass.rs");
}
