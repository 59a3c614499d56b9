// Portal session state
// The caller owns its current identity; the registry holds sessions for HTTP clients

pub mod registry;
pub mod types;

pub use registry::SessionRegistry;
pub use types::PortalSession;
