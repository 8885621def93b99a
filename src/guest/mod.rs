// Guest model and lookup
pub mod resolver;

pub use resolver::GuestResolver;

use serde::Serialize;
use std::fmt;

/// Kind of Proxmox guest. The lowercase name is used in archive names and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    /// LXC container
    Lxc,
    /// KVM virtual machine
    Kvm,
}

impl GuestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestKind::Lxc => "lxc",
            GuestKind::Kvm => "kvm",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "lxc" => Some(GuestKind::Lxc),
            "kvm" => Some(GuestKind::Kvm),
            _ => None,
        }
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra columns reported by `qm list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmResources {
    pub memory_mb: u64,
    pub bootdisk_gb: String,
    pub pid: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRecord {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub lock: Option<String>,
    pub kind: GuestKind,
    pub resources: Option<VmResources>,
}

impl GuestRecord {
    /// Archive file name the guest is stored under in the repository.
    pub fn archive_name(&self) -> String {
        archive_name(&self.name, self.kind)
    }
}

/// `<name>_<kind>.tar.zst`
pub fn archive_name(name: &str, kind: GuestKind) -> String {
    format!("{}_{}.tar.zst", name, kind)
}
