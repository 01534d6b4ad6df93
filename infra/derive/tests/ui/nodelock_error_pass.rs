use nodelock_derive::nodelock_error;
use std::borrow::Cow;

#[nodelock_error]
#[derive(Debug)]
pub enum BlobError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing blob: {message}")]
    Missing { message: Cow<'static, str> },
}

fn parse(raw: &str) -> Result<u8, BlobError> {
    raw.parse::<u8>().context("parsing nonce length")
}

fn main() {
    let _ = parse("12");
}
