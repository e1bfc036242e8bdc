//! Resolve observers - where the resolver reports recoverable problems
//!
//! The resolver never fails, so anything worth knowing about (a missing profile
//! file, a user with no record) is handed to an observer instead. The default
//! forwards to the `log` facade; callers inject their own to collect events.

use std::path::Path;

use crate::error::ProfileError;

/// Receives the non-fatal events raised while resolving templates
pub trait ResolveObserver {
    /// The profile store file does not exist
    fn profile_missing(&self, path: &Path) {
        let _ = path;
    }

    /// The profile store exists but could not be read or parsed
    fn profile_malformed(&self, path: &Path, error: &ProfileError) {
        let _ = (path, error);
    }

    /// The profile store has no record for this user
    fn user_not_found(&self, user: &str) {
        let _ = user;
    }

    /// A placeholder was left literal because its variable is unset or falsy
    fn unresolved(&self, name: &str) {
        let _ = name;
    }
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ResolveObserver for LogObserver {
    fn profile_missing(&self, path: &Path) {
        log::warn!("Profile store missing: {}", path.display());
    }

    fn profile_malformed(&self, path: &Path, error: &ProfileError) {
        log::error!("Error loading profile store from {}: {}", path.display(), error);
    }

    fn user_not_found(&self, user: &str) {
        log::debug!("No profile record for user '{}'", user);
    }

    fn unresolved(&self, name: &str) {
        log::debug!("Leaving placeholder {{{}}} unresolved", name);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ResolveObserver for NullObserver {}

impl<T: ResolveObserver + ?Sized> ResolveObserver for &T {
    fn profile_missing(&self, path: &Path) {
        (**self).profile_missing(path)
    }

    fn profile_malformed(&self, path: &Path, error: &ProfileError) {
        (**self).profile_malformed(path, error)
    }

    fn user_not_found(&self, user: &str) {
        (**self).user_not_found(user)
    }

    fn unresolved(&self, name: &str) {
        (**self).unresolved(name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Records every event as a short string for assertions
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        pub events: RefCell<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl ResolveObserver for RecordingObserver {
        fn profile_missing(&self, _path: &Path) {
            self.events.borrow_mut().push("missing".to_string());
        }

        fn profile_malformed(&self, _path: &Path, _error: &ProfileError) {
            self.events.borrow_mut().push("malformed".to_string());
        }

        fn user_not_found(&self, user: &str) {
            self.events.borrow_mut().push(format!("no-user:{}", user));
        }

        fn unresolved(&self, name: &str) {
            self.events.borrow_mut().push(format!("unresolved:{}", name));
        }
    }
}
