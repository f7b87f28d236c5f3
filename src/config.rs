/// Config of a blueprint
/// ## Fields
/// - `singleton`:
///   If `true`, the first instance built for the class identifier is cached and reused.
///
///   The cache is keyed by the identifier, so `Foo#default` and `Foo#remote` are cached separately.
///   Changing the flag after the instance was cached doesn't evict it.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub singleton: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { singleton: true }
    }
}
