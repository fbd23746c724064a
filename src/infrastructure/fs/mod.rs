//! File system locations

mod home;

pub use home::{
    dotship_home_dir, expand_home, global_settings_path, machine_settings_path, user_secrets_path,
    user_secrets_root, DOTSHIP_HOME_VAR,
};
