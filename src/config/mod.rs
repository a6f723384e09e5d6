//! Configuration module

mod site;

pub use site::ContentConfig;
pub use site::DisplayConfig;
pub use site::SiteConfig;
