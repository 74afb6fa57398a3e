use std::sync::LazyLock;

use derive_from_env::FromEnv;

const DEFAULT_MAX_SPLIT_DEPTH: usize = 64;

#[derive(FromEnv)]
#[from_env(prefix = "MULOG")]
#[allow(non_snake_case)]
pub struct MulogConfig {
    /// Number of nested split loggers a message walks through before it is dropped.
    #[from_env(default = "64")]
    pub MAX_SPLIT_DEPTH: usize,
}

pub static MULOG_CONFIG: LazyLock<MulogConfig> = LazyLock::new(|| {
    MulogConfig::from_env().unwrap_or(MulogConfig {
        MAX_SPLIT_DEPTH: DEFAULT_MAX_SPLIT_DEPTH,
    })
});
