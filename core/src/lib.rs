pub mod disposal;
pub mod filename;
pub mod infer;
pub mod installer;
pub mod mods_dir;
pub mod record;
pub mod search;
pub mod update;
pub mod updater;
