pub mod application_handlers;
pub mod gmail_handlers;
pub mod helpers;
pub mod system_handlers;

pub use application_handlers::*;
pub use gmail_handlers::*;
pub use system_handlers::*;
