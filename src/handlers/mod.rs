//! Command handler modules
//!
//! One module per subcommand, called from main.rs once arguments are resolved.

pub mod full_backup;

pub use full_backup::handle_full_backup;
