use quip::views::Engines;

#[cfg(feature = "minijinja")]
pub mod minijinja;

#[cfg(feature = "tera")]
pub mod tera;

/// Registers every enabled engine with `engines`, under each of its
/// extensions.
#[allow(unused_variables)]
pub fn register(engines: &mut Engines) {
    #[cfg(feature = "minijinja")]
    for ext in self::minijinja::MiniJinjaEngine::EXTENSIONS {
        engines.register(ext, || Ok(self::minijinja::MiniJinjaEngine::new()));
    }

    #[cfg(feature = "tera")]
    engines.register(self::tera::TeraEngine::EXT, || Ok(self::tera::TeraEngine::new()));
}
