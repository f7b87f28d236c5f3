use super::base::Service;

/// Wraps a closure taking the whole request, e.g. `Arguments` for constructors
/// or `(Instance, Arguments)` for methods.
#[inline]
#[must_use]
pub(crate) const fn service_fn<F>(f: F) -> ServiceFn<F> {
    ServiceFn { f }
}

#[derive(Clone)]
pub(crate) struct ServiceFn<F> {
    f: F,
}

impl<F, Request, Response, Error> Service<Request> for ServiceFn<F>
where
    F: FnMut(Request) -> Result<Response, Error>,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Response, Error> {
        (self.f)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{service_fn, Service as _};
    use crate::{
        argument::Arguments,
        errors::InstantiateErrorKind,
        value::{Instance, Value},
    };

    struct Greeter {
        greeting: &'static str,
    }

    #[test]
    fn test_arguments_request() {
        let mut service = service_fn(|arguments: Arguments| -> Result<Value, InstantiateErrorKind> {
            Ok(Value::from(arguments.int("port")? + 1))
        });

        let value = service.call(Arguments::new().with("port", 8079)).unwrap();
        assert_eq!(value.as_int(), Some(8080));

        let err = service.call(Arguments::new()).unwrap_err();
        assert!(matches!(err, InstantiateErrorKind::MissingArgument { name } if name == "port"));
    }

    #[test]
    fn test_receiver_request() {
        let mut service = service_fn(
            |(receiver, arguments): (Instance, Arguments)| -> Result<Value, InstantiateErrorKind> {
                let greeter = receiver.downcast_ref::<Greeter>().ok_or(InstantiateErrorKind::IncorrectReceiver {
                    expected: "Greeter",
                })?;
                Ok(Value::from(format!("{}, {}", greeter.greeting, arguments.string("name")?)))
            },
        );

        let receiver = Instance::new(Greeter { greeting: "hello" });
        let value = service.call((receiver, Arguments::new().with("name", "world"))).unwrap();
        assert_eq!(value.as_str(), Some("hello, world"));

        let err = service.call((Instance::new(1u8), Arguments::new())).unwrap_err();
        assert!(matches!(err, InstantiateErrorKind::IncorrectReceiver { .. }));
    }
}
