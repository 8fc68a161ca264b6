//! Facade crate for the Shiok daily word service.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no game logic.
//!
//! ## Usage
//! - Depend on `shiok` with the `server` feature.
//! - Call `shiok::init` to build every feature slice, then merge `server::router::api_router`.

pub use shiok_domain as domain;
use shiok_domain::config::ApiConfig;
pub use shiok_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use shiok_kernel::server::router::{OpenApiRouter, system_router};
        use shiok_kernel::server::ApiState;

        /// All feature routes, ready to be merged next to the system routes.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(crate::features::daily_word::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use shiok_daily_word as daily_word;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "daily-word",
    ];
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails, e.g. a missing upstream key.
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::daily_word::init(config)?];
    Ok(slices)
}
