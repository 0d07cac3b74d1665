// Command handlers module
pub mod check;
pub mod run;
pub mod snapshot;
pub mod version;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use run::execute as run;
pub use snapshot::execute as snapshot;
pub use version::execute as version;
