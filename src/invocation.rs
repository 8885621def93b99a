use crate::guest::GuestKind;
use crate::{MigrateError, Result};
use byte_unit::Byte;

const GIB: u64 = 1024 * 1024 * 1024;
const GB: u64 = 1000 * 1000 * 1000;

/// Restic repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub url: String,
    pub password: String,
    pub access_key: Option<String>,
}

/// Where and how an imported archive is restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreTarget {
    Container {
        hostname: String,
        root_size_gb: u64,
    },
    Vm,
}

impl RestoreTarget {
    pub fn kind(&self) -> GuestKind {
        match self {
            RestoreTarget::Container { .. } => GuestKind::Lxc,
            RestoreTarget::Vm => GuestKind::Kvm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub vmid: u32,
    pub template: String,
    pub storage: String,
    pub force: bool,
    pub unique: bool,
    pub target: RestoreTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Export { vmid: u32 },
    Import(ImportOptions),
    List { kind: Option<GuestKind> },
}

/// Fully parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    pub repository: Repository,
    pub operation: Operation,
}

/// Parse a root disk size into whole gigabytes.
///
/// A bare number is taken as gigabytes. Sizes with a unit must be a whole
/// number of GiB or GB.
pub fn parse_root_size(value: &str) -> Result<u64> {
    let invalid = |reason: &str| MigrateError::InvalidSize(value.to_string(), reason.to_string());

    let trimmed = value.trim();
    let gb = if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse::<u64>().map_err(|e| invalid(&e.to_string()))?
    } else {
        let bytes = Byte::parse_str(trimmed, true)
            .map_err(|e| invalid(&e.to_string()))?
            .as_u64();
        if bytes % GIB == 0 {
            bytes / GIB
        } else if bytes % GB == 0 {
            bytes / GB
        } else {
            return Err(invalid("not a whole number of gigabytes"));
        }
    };

    if gb == 0 {
        return Err(invalid("must be at least 1 GB"));
    }
    Ok(gb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_root_size("8").unwrap(), 8);
        assert_eq!(parse_root_size(" 32 ").unwrap(), 32);
    }

    #[test]
    fn test_parse_binary_units() {
        assert_eq!(parse_root_size("8GiB").unwrap(), 8);
        assert_eq!(parse_root_size("2048MiB").unwrap(), 2);
    }

    #[test]
    fn test_parse_decimal_units() {
        assert_eq!(parse_root_size("16GB").unwrap(), 16);
    }

    #[test]
    fn test_parse_rejects_fractions_and_zero() {
        assert!(matches!(
            parse_root_size("500MiB"),
            Err(MigrateError::InvalidSize(..))
        ));
        assert!(matches!(parse_root_size("0"), Err(MigrateError::InvalidSize(..))));
        assert!(matches!(parse_root_size("lots"), Err(MigrateError::InvalidSize(..))));
        assert!(matches!(parse_root_size(""), Err(MigrateError::InvalidSize(..))));
    }

    #[test]
    fn test_restore_target_kind() {
        let container = RestoreTarget::Container {
            hostname: "web".into(),
            root_size_gb: 8,
        };
        assert_eq!(container.kind(), GuestKind::Lxc);
        assert_eq!(RestoreTarget::Vm.kind(), GuestKind::Kvm);
    }
}
