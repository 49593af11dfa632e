//! VM configuration loaded from YAML
//!
//! ```yaml
//! timeout: 1000        # milliseconds, required
//! max_loop_depth: 16   # optional
//! max_output: 400      # optional, characters; unbounded when absent
//! ```

use crate::{
    error::{Result, TapeVmError},
    vm::TapeVm,
};
use serde::Deserialize;
use std::path::Path;

/// Settings for running programs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VmConfig {
    /// Time budget per run, in milliseconds
    pub timeout: u64,

    /// Maximum loop nesting depth
    #[serde(default = "default_max_loop_depth")]
    pub max_loop_depth: usize,

    /// Maximum characters a run may output
    #[serde(default)]
    pub max_output: Option<usize>,
}

fn default_max_loop_depth() -> usize {
    TapeVm::DEFAULT_MAX_LOOP_DEPTH
}

impl VmConfig {
    /// Creates a config with the given timeout and default limits
    pub fn new(timeout: u64) -> Self {
        Self {
            timeout,
            max_loop_depth: TapeVm::DEFAULT_MAX_LOOP_DEPTH,
            max_output: None,
        }
    }

    /// Parse and validate a config from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| TapeVmError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(TapeVmError::InvalidTimeout(self.timeout));
        }
        if self.max_loop_depth == 0 || self.max_loop_depth > TapeVm::MAX_LOOP_DEPTH {
            return Err(TapeVmError::InvalidLoopDepth {
                depth: self.max_loop_depth,
                max: TapeVm::MAX_LOOP_DEPTH,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal() {
        let config = VmConfig::from_yaml("timeout: 1500").unwrap();
        assert_eq!(config, VmConfig::new(1500));
        assert_eq!(config.max_loop_depth, 16);
        assert_eq!(config.max_output, None);
    }

    #[test]
    fn test_parse_full() {
        let config =
            VmConfig::from_yaml("timeout: 20\nmax_loop_depth: 64\nmax_output: 400\n").unwrap();
        assert_eq!(config.timeout, 20);
        assert_eq!(config.max_loop_depth, 64);
        assert_eq!(config.max_output, Some(400));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = VmConfig::from_yaml("timeout: 0");
        assert!(matches!(result, Err(TapeVmError::InvalidTimeout(0))));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let result = VmConfig::from_yaml("timeout: -5");
        assert!(matches!(result, Err(TapeVmError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_timeout_rejected() {
        let result = VmConfig::from_yaml("max_loop_depth: 4");
        assert!(matches!(result, Err(TapeVmError::ConfigParse(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = VmConfig::from_yaml("timeout: 10\ntimout: 20");
        assert!(result.is_err());
    }

    #[test]
    fn test_loop_depth_bounds() {
        assert!(VmConfig::from_yaml("timeout: 10\nmax_loop_depth: 0").is_err());
        let too_deep = format!("timeout: 10\nmax_loop_depth: {}", TapeVm::MAX_LOOP_DEPTH.saturating_add(1));
        assert!(matches!(
            VmConfig::from_yaml(&too_deep),
            Err(TapeVmError::InvalidLoopDepth { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout: 250").unwrap();

        let config = VmConfig::load(file.path()).unwrap();
        assert_eq!(config.timeout, 250);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = VmConfig::load(dir.path().join("brainfuck.yml"));
        assert!(matches!(result, Err(TapeVmError::ConfigIo { .. })));
    }
}
