/// A fallible call with an owned request.
/// Constructors, methods, factories and invokables are all stored as services,
/// so the resolution engine calls user code through one shape.
pub(crate) trait Service<Request> {
    type Response;
    type Error;

    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error>;
}
