//! VM configuration.
//!
//! A handful of knobs that choose between the reference behavior and a
//! stricter alternative where the guest ABI leaves room. Defaults reproduce
//! the reference behavior. `from_env` lets an embedder pick them up from
//! `RVSYS_*` environment variables.
use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

pub const ENV_VERBOSE: &str = "RVSYS_VERBOSE";
pub const ENV_CLOSE_POLICY: &str = "RVSYS_CLOSE_POLICY";
pub const ENV_FLOAT_FD_KEY: &str = "RVSYS_FLOAT_FD_KEY";
pub const ENV_INITIAL_BRK: &str = "RVSYS_INITIAL_BRK";

/// What `close` reports for an fd that is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosePolicy {
    /// Report success, as the reference runtime does.
    #[default]
    Lenient,
    /// Report failure.
    Strict,
}

impl FromStr for ClosePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ClosePolicy::Lenient),
            "strict" => Ok(ClosePolicy::Strict),
            other => Err(anyhow!("unknown close policy `{}` (expected lenient or strict)", other)),
        }
    }
}

/// Which register `readfloat` takes its fd from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFdKey {
    /// The raw bit pattern of fa0, as the reference runtime does.
    #[default]
    FloatRegisterBits,
    /// a0, like `readint`.
    IntegerRegister,
}

impl FromStr for FloatFdKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fbits" => Ok(FloatFdKey::FloatRegisterBits),
            "int" => Ok(FloatFdKey::IntegerRegister),
            other => Err(anyhow!("unknown readfloat fd key `{}` (expected fbits or int)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmConfig {
    /// Greater than zero echoes every syscall failure to host stderr.
    pub verbosity: isize,
    pub close_policy: ClosePolicy,
    pub float_fd_key: FloatFdKey,
    /// Break address before the guest's first `brk`.
    pub initial_break: u32,
}

impl VmConfig {
    /// Reads the `RVSYS_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`VmConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = VmConfig::default();
        if let Some(v) = lookup(ENV_VERBOSE) {
            config.verbosity = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {} value `{}`", ENV_VERBOSE, v))?;
        }
        if let Some(v) = lookup(ENV_CLOSE_POLICY) {
            config.close_policy = v
                .parse()
                .with_context(|| format!("invalid {}", ENV_CLOSE_POLICY))?;
        }
        if let Some(v) = lookup(ENV_FLOAT_FD_KEY) {
            config.float_fd_key = v
                .parse()
                .with_context(|| format!("invalid {}", ENV_FLOAT_FD_KEY))?;
        }
        if let Some(v) = lookup(ENV_INITIAL_BRK) {
            config.initial_break =
                parse_addr(&v).with_context(|| format!("invalid {}", ENV_INITIAL_BRK))?;
        }
        Ok(config)
    }
}

/// Decimal or `0x` prefixed hexadecimal 32-bit address.
fn parse_addr(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty address");
    }
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.with_context(|| format!("`{}` is not a 32-bit address", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    lazy_static! {
        // from_env touches process-wide state
        static ref ENV_MUTEX: Mutex<()> = Mutex::new(());
    }

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_reference_behavior() {
        let config = VmConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, VmConfig::default());
        assert_eq!(config.close_policy, ClosePolicy::Lenient);
        assert_eq!(config.float_fd_key, FloatFdKey::FloatRegisterBits);
        assert_eq!(config.initial_break, 0);
    }

    #[test]
    fn all_knobs_parse() {
        let config = VmConfig::from_lookup(lookup_in(&[
            (ENV_VERBOSE, "2"),
            (ENV_CLOSE_POLICY, "Strict"),
            (ENV_FLOAT_FD_KEY, "int"),
            (ENV_INITIAL_BRK, "0x10000"),
        ]))
        .unwrap();
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.close_policy, ClosePolicy::Strict);
        assert_eq!(config.float_fd_key, FloatFdKey::IntegerRegister);
        assert_eq!(config.initial_break, 0x10000);

        let config = VmConfig::from_lookup(lookup_in(&[(ENV_INITIAL_BRK, "4096")])).unwrap();
        assert_eq!(config.initial_break, 4096);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(VmConfig::from_lookup(lookup_in(&[(ENV_VERBOSE, "loud")])).is_err());
        assert!(VmConfig::from_lookup(lookup_in(&[(ENV_CLOSE_POLICY, "maybe")])).is_err());
        assert!(VmConfig::from_lookup(lookup_in(&[(ENV_FLOAT_FD_KEY, "fa0")])).is_err());
        assert!(VmConfig::from_lookup(lookup_in(&[(ENV_INITIAL_BRK, "0x1_0000_0000")])).is_err());
        assert!(VmConfig::from_lookup(lookup_in(&[(ENV_INITIAL_BRK, "")])).is_err());
    }

    #[test]
    fn from_env_reads_process_environment() {
        let _guard = ENV_MUTEX.lock();
        std::env::set_var(ENV_CLOSE_POLICY, "strict");
        let config = VmConfig::from_env();
        std::env::remove_var(ENV_CLOSE_POLICY);
        assert_eq!(config.unwrap().close_policy, ClosePolicy::Strict);
    }
}
