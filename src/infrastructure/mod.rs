//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{
    default_config_file, default_download_dir, ensure_parent, expand_tilde, get_data_dir,
};
