mod factory;
mod instantiate;
mod resolve;

pub use factory::FactoryErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use resolve::ResolveErrorKind;
