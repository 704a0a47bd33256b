//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::IndexGeneratorConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
