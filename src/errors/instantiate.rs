/// Errors raised by user code: constructors, methods, factories and invokables.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Argument `{name}` wasn't passed")]
    MissingArgument { name: String },
    #[error("Argument `{name}` has incorrect type, expected: {expected}")]
    IncorrectArgumentType { name: String, expected: &'static str },
    #[error("Method receiver has incorrect type, expected: {expected}")]
    IncorrectReceiver { expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
