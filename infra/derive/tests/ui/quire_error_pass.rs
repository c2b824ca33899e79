use quire_derive::quire_error;
use std::borrow::Cow;

#[quire_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk")).context("Reading fixture")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading fixture): disk");

    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "nope".into(), context: None });
    let err = err.context("Validating").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (Validating): nope");
}
