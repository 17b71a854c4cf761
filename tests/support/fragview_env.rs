use std::{
    ffi::OsString,
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process-wide env lock while one test overrides variables.
pub struct FragviewEnvGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl FragviewEnvGuard {
    pub fn lock() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set_config_home(path: PathBuf) -> Self {
        let mut guard = Self::lock();
        guard.set(fragview::app_dirs::CONFIG_HOME_ENV, Some(path.into_os_string()));
        guard
    }

    pub fn set(&mut self, key: &'static str, value: Option<OsString>) {
        self.previous.push((key, std::env::var_os(key)));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

impl Drop for FragviewEnvGuard {
    fn drop(&mut self) {
        while let Some((key, value)) = self.previous.pop() {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
