use nodelock_logger::{Logger, LoggerError};

#[test]
fn second_install_is_refused() {
    let logger = Logger::builder("nodelock-first").verbosity(1).init().expect("first init");
    assert!(!logger.has_file_output());

    let err = Logger::builder("nodelock-second").init().expect_err("second init should fail");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "got {err:?}");
}
