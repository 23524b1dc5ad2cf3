mod api;
mod badge;
mod profile;

pub use api::*;
pub use badge::*;
pub use profile::*;
