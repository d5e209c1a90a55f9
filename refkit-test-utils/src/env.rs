//! Environment variable management for testing
//!
//! Tests that read process-wide configuration (such as the GitHub token) set
//! variables through [`EnvTestGuard`], which restores the original values on
//! drop. Combine with `#[serial]` since the environment is shared by all test
//! threads.

use std::env;

/// Overrides environment variables for the lifetime of the guard
pub struct EnvTestGuard {
  /// Original values, restored in reverse order on drop
  originals: Vec<(String, Option<String>)>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// Create a guard that has not overridden anything yet
  pub const fn new() -> Self {
    Self { originals: Vec::new() }
  }

  /// Create a guard with a single variable set (`Some`) or removed (`None`)
  pub fn with_var(key: &str, value: Option<&str>) -> Self {
    let mut guard = Self::new();
    guard.set(key, value);
    guard
  }

  /// Set (`Some`) or remove (`None`) a variable until the guard drops
  pub fn set(&mut self, key: &str, value: Option<&str>) -> &mut Self {
    self.originals.push((key.to_string(), env::var(key).ok()));

    match value {
      Some(val) => unsafe {
        env::set_var(key, val);
      },
      None => unsafe {
        env::remove_var(key);
      },
    }

    self
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    // Restore original environment variables
    for (key, original) in self.originals.drain(..).rev() {
      match original {
        Some(val) => unsafe {
          env::set_var(&key, val);
        },
        None => unsafe {
          env::remove_var(&key);
        },
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_guard_restores_variables() {
    let key = "REFKIT_TEST_UTILS_GUARD_VAR";
    unsafe {
      env::set_var(key, "original");
    }

    {
      let mut guard = EnvTestGuard::new();
      guard.set(key, Some("first")).set(key, None);
      assert!(env::var(key).is_err());
    }

    assert_eq!(env::var(key).ok().as_deref(), Some("original"));
    unsafe {
      env::remove_var(key);
    }
  }
}
