use super::{GuestKind, GuestRecord, VmResources};
use crate::exec::{CommandRunner, Environment};
use crate::Result;
use regex::Regex;

const CONTAINER_LIST_COMMAND: &str = "pct list";
const VM_LIST_COMMAND: &str = "qm list";

/// Looks up guests by id in the `pct list` and `qm list` tables.
pub struct GuestResolver<'a, R: CommandRunner> {
    runner: &'a R,
    env: &'a Environment,
    container_row: Regex,
    vm_row: Regex,
}

impl<'a, R: CommandRunner> GuestResolver<'a, R> {
    pub fn new(runner: &'a R, env: &'a Environment) -> Self {
        Self {
            runner,
            env,
            // VMID Status [Lock] Name
            container_row: Regex::new(r"^(\d+)\s+(\w+)\s+(?:(\w+)\s+)?([\w\-]+)")
                .expect("container row pattern is valid"),
            // VMID Name Status Mem(MB) BootDisk(GB) PID
            vm_row: Regex::new(r"^(\d+)\s+([\w\-]+)\s+(\w+)\s+(\d+)\s+([\d.]+)\s+(\d+)")
                .expect("vm row pattern is valid"),
        }
    }

    /// Find a guest by id. Containers are checked before VMs.
    ///
    /// Returns `Ok(None)` when neither listing contains the id.
    pub fn resolve(&self, id: u32) -> Result<Option<GuestRecord>> {
        if let Some(stdout) = self.listing(CONTAINER_LIST_COMMAND)? {
            if let Some(record) = self.find_container(&stdout, id) {
                tracing::debug!(id, name = %record.name, "Matched container row");
                return Ok(Some(record));
            }
        }

        if let Some(stdout) = self.listing(VM_LIST_COMMAND)? {
            if let Some(record) = self.find_vm(&stdout, id) {
                tracing::debug!(id, name = %record.name, "Matched vm row");
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    fn listing(&self, command: &str) -> Result<Option<String>> {
        let result = self.runner.run(command, self.env)?;
        if !result.success() {
            tracing::warn!(
                command,
                code = %result.code_display(),
                stderr = %result.stderr.trim(),
                "Guest listing failed"
            );
            return Ok(None);
        }
        Ok(Some(result.stdout))
    }

    /// First row of `pct list` output whose id equals `id`
    pub fn find_container(&self, listing: &str, id: u32) -> Option<GuestRecord> {
        listing.lines().find_map(|line| {
            let caps = self.container_row.captures(line.trim())?;
            if caps[1].parse::<u32>().ok()? != id {
                return None;
            }
            Some(GuestRecord {
                id,
                name: caps[4].to_string(),
                status: caps[2].to_string(),
                lock: caps.get(3).map(|m| m.as_str().to_string()),
                kind: GuestKind::Lxc,
                resources: None,
            })
        })
    }

    /// First row of `qm list` output whose id equals `id`
    pub fn find_vm(&self, listing: &str, id: u32) -> Option<GuestRecord> {
        listing.lines().find_map(|line| {
            let caps = self.vm_row.captures(line.trim())?;
            if caps[1].parse::<u32>().ok()? != id {
                return None;
            }
            Some(GuestRecord {
                id,
                name: caps[2].to_string(),
                status: caps[3].to_string(),
                lock: None,
                kind: GuestKind::Kvm,
                resources: Some(VmResources {
                    memory_mb: caps[4].parse().ok()?,
                    bootdisk_gb: caps[5].to_string(),
                    pid: caps[6].parse().ok()?,
                }),
            })
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
