use tracing::{debug, error};

use crate::{
    argument::{ArgumentSet, Arguments, RawArgument},
    errors::ResolveErrorKind,
    identifier::{ClassIdentifier, DEFAULT_TAG},
    parameter::Parameter,
    stack::ResolutionStack,
    value::Value,
    Container,
};

/// Resolves parameters in declaration order.
///
/// `tiers` are consulted in order and the first one that names a parameter provides its raw value.
/// Parameters no tier names fall back to their declared type and default value.
pub(crate) fn resolve_arguments(
    container: &Container,
    target: &str,
    parameters: &[Parameter],
    tiers: &[&ArgumentSet],
    stack: &mut ResolutionStack,
) -> Result<Arguments, ResolveErrorKind> {
    let mut arguments = Arguments::new();
    for parameter in parameters {
        let raw = tiers.iter().find_map(|tier| tier.get(&parameter.name));
        let value = resolve_argument(container, target, parameter, raw, stack)?;
        arguments.push(parameter.name.clone(), value);
    }
    Ok(arguments)
}

pub(crate) fn resolve_argument(
    container: &Container,
    target: &str,
    parameter: &Parameter,
    raw: Option<&RawArgument>,
    stack: &mut ResolutionStack,
) -> Result<Value, ResolveErrorKind> {
    match raw {
        None => resolve_unconfigured(container, target, parameter, stack),
        Some(RawArgument::Literal(value)) => Ok(value.clone()),
        // The parameter wants the callable itself, not what it produces
        Some(RawArgument::Invokable(invokable)) if parameter.declared_type.is_callable() => {
            Ok(Value::Callable(invokable.clone()))
        }
        Some(RawArgument::Invokable(invokable)) => invokable.call(Arguments::new()).map_err(|source| {
            let err = ResolveErrorKind::Instantiate {
                target: format!("value of argument `{}` of {target}", parameter.name),
                source,
            };
            error!("{}", err);
            err
        }),
        Some(RawArgument::String(name)) => {
            if parameter.declared_type.type_name().is_some() {
                container.make_nested(&ClassIdentifier::parse(name), &ArgumentSet::new(), stack)
            } else {
                Ok(Value::String(name.clone()))
            }
        }
    }
}

fn resolve_unconfigured(
    container: &Container,
    target: &str,
    parameter: &Parameter,
    stack: &mut ResolutionStack,
) -> Result<Value, ResolveErrorKind> {
    if let Some(type_name) = parameter.declared_type.type_name() {
        let identifier = ClassIdentifier::new(type_name, DEFAULT_TAG);
        return match container.make_nested(&identifier, &ArgumentSet::new(), stack) {
            Ok(value) => Ok(value),
            Err(err) if err.is_recoverable() => match &parameter.default {
                Some(default) => {
                    debug!(parameter = %parameter.name, %err, "Using default value");
                    Ok(default.clone())
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        };
    }

    if let Some(default) = &parameter.default {
        return Ok(default.clone());
    }

    let err = ResolveErrorKind::UnresolvableArgument {
        target: target.to_owned(),
        parameter: parameter.name.clone(),
    };
    error!("{}", err);
    Err(err)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    };

    use tracing_test::traced_test;

    use super::{resolve_argument, resolve_arguments};
    use crate::{
        argument::{ArgumentSet, RawArgument},
        class::{ClassDef, Classes},
        errors::ResolveErrorKind,
        invokable::Invokable,
        parameter::Parameter,
        stack::ResolutionStack,
        value::Value,
        Container,
    };

    struct Transport;

    fn container() -> Container {
        Container::new(
            Classes::new()
                .register(ClassDef::class("Transport").constructor(|_| Ok(Transport)))
                .register(ClassDef::interface("Logger")),
        )
    }

    #[test]
    #[traced_test]
    fn test_unconfigured() {
        let container = container();
        let mut stack = ResolutionStack::new();

        let transport = Parameter::class("transport", "Transport");
        let value = resolve_argument(&container, "Mailer", &transport, None, &mut stack).unwrap();
        assert!(value.downcast::<Transport>().is_some());

        let value = resolve_argument(&container, "Mailer", &Parameter::new("port").with_default(25), None, &mut stack).unwrap();
        assert_eq!(value.as_int(), Some(25));

        let err = resolve_argument(&container, "Mailer", &Parameter::new("host"), None, &mut stack).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::UnresolvableArgument { parameter, .. } if parameter == "host"));

        assert!(stack.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_unresolvable_class_falls_back_to_default() {
        let container = container();
        let mut stack = ResolutionStack::new();

        let value = resolve_argument(
            &container,
            "Mailer",
            &Parameter::interface("logger", "Logger").with_default(()),
            None,
            &mut stack,
        )
        .unwrap();
        assert!(value.is_null());
        assert!(stack.is_empty());
        assert!(logs_contain("Using default value"));

        let logger = Parameter::interface("logger", "Logger");
        let err = resolve_argument(&container, "Mailer", &logger, None, &mut stack).unwrap_err();
        assert!(matches!(err, ResolveErrorKind::UnmappedAbstractType { .. }));
    }

    #[test]
    #[traced_test]
    fn test_invokable_semantics() {
        let call_count = Arc::new(AtomicU8::new(0));
        let invokable = Invokable::new({
            let call_count = call_count.clone();
            move || {
                call_count.fetch_add(1, Ordering::SeqCst);
                Ok("produced")
            }
        });
        let raw = RawArgument::Invokable(invokable);
        let container = container();
        let mut stack = ResolutionStack::new();

        let value = resolve_argument(&container, "Mailer", &Parameter::new("host"), Some(&raw), &mut stack).unwrap();
        assert_eq!(value.as_str(), Some("produced"));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        let value = resolve_argument(&container, "Mailer", &Parameter::callable("on_send"), Some(&raw), &mut stack).unwrap();
        assert!(matches!(value, Value::Callable(_)));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn test_string_semantics() {
        let container = container();
        let mut stack = ResolutionStack::new();
        let raw = RawArgument::from("Transport");

        let transport = Parameter::class("transport", "Transport");
        let value = resolve_argument(&container, "Mailer", &transport, Some(&raw), &mut stack).unwrap();
        assert!(value.downcast::<Transport>().is_some());

        let value = resolve_argument(&container, "Mailer", &Parameter::new("name"), Some(&raw), &mut stack).unwrap();
        assert_eq!(value.as_str(), Some("Transport"));
    }

    #[test]
    #[traced_test]
    fn test_tier_precedence() {
        let container = container();
        let mut stack = ResolutionStack::new();
        let overrides = ArgumentSet::new().with("host", "override");
        let configured = ArgumentSet::new().with("host", "configured").with("port", 2525);

        let arguments = resolve_arguments(
            &container,
            "Mailer",
            &[Parameter::new("host"), Parameter::new("port"), Parameter::new("secure").with_default(false)],
            &[&overrides, &configured],
            &mut stack,
        )
        .unwrap();

        assert_eq!(arguments.string("host").unwrap(), "override");
        assert_eq!(arguments.int("port").unwrap(), 2525);
        assert!(!arguments.bool("secure").unwrap());
    }
}
