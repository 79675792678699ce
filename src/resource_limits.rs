//! Resource-Limit Table (RLT).
//!
//! A static catalog of the kernel resource limits `nurse` knows how to
//! set, mapping a symbolic name to a `nix::sys::resource::Resource` and
//! holding the per-invocation soft/hard values plus an "active" flag.
//! Declared once at program start; mutated only by the Argument Binder
//! before fork; read-only thereafter. The three companion binaries
//! (`getrlim`, `setrlim`, `trylim`) reuse this same catalog so the set
//! of resource names stays in exactly one place.

use nix::sys::resource::{rlim_t, Resource};

/// One entry of the resource-limit catalog.
#[derive(Clone)]
pub struct ResourceLimitEntry {
    pub resource: Resource,
    pub name: &'static str,
    pub active: bool,
    pub soft: rlim_t,
    pub hard: rlim_t,
}

impl ResourceLimitEntry {
    fn new(resource: Resource, name: &'static str) -> ResourceLimitEntry {
        ResourceLimitEntry {
            resource,
            name,
            active: false,
            soft: 0,
            hard: 0,
        }
    }
}

/// Builds a fresh copy of the RLT catalog, all entries inactive.
///
/// Returns an owned `Vec` rather than a `lazy_static` table directly,
/// since every invocation's Argument Binder mutates its own copy
/// in-place (resources named on the command line become `active`);
/// after `fork()` the child and parent each see their own process-local
/// copy, with no cross-process synchronization required (SPEC_FULL.md
/// §5).
pub fn new_catalog() -> Vec<ResourceLimitEntry> {
    vec![
        ResourceLimitEntry::new(Resource::RLIMIT_AS, "AS"),
        ResourceLimitEntry::new(Resource::RLIMIT_CORE, "CORE"),
        ResourceLimitEntry::new(Resource::RLIMIT_CPU, "CPU"),
        ResourceLimitEntry::new(Resource::RLIMIT_DATA, "DATA"),
        ResourceLimitEntry::new(Resource::RLIMIT_FSIZE, "FSIZE"),
        ResourceLimitEntry::new(Resource::RLIMIT_LOCKS, "LOCKS"),
        ResourceLimitEntry::new(Resource::RLIMIT_MEMLOCK, "MEMLOCK"),
        ResourceLimitEntry::new(Resource::RLIMIT_NOFILE, "NOFILE"),
        ResourceLimitEntry::new(Resource::RLIMIT_NPROC, "NPROC"),
        ResourceLimitEntry::new(Resource::RLIMIT_RSS, "RSS"),
        ResourceLimitEntry::new(Resource::RLIMIT_STACK, "STACK"),
    ]
}

/// Finds the catalog entry with the given symbolic name, if any.
pub fn find_mut<'a>(
    catalog: &'a mut [ResourceLimitEntry],
    name: &str,
) -> Option<&'a mut ResourceLimitEntry> {
    catalog.iter_mut().find(|entry| entry.name == name)
}

/// Applies every active entry of `catalog` to the current process via
/// `setrlimit(2)`. Meant to run in the forked child, before `execve`.
pub fn apply(catalog: &[ResourceLimitEntry]) -> nix::Result<()> {
    use nix::sys::resource::setrlimit;

    for entry in catalog {
        if entry.active {
            crate::nurse_debug!("setting {} = {} {}", entry.name, entry.soft, entry.hard);
            setrlimit(entry.resource, entry.soft, entry.hard)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_inactive() {
        let catalog = new_catalog();
        assert!(catalog.iter().all(|e| !e.active));
        assert_eq!(catalog.iter().find(|e| e.name == "NOFILE").is_some(), true);
    }

    #[test]
    fn find_mut_activates_named_entry() {
        let mut catalog = new_catalog();
        {
            let entry = find_mut(&mut catalog, "STACK").expect("STACK must exist");
            entry.active = true;
            entry.soft = 4096;
            entry.hard = 4096;
        }
        let entry = catalog.iter().find(|e| e.name == "STACK").unwrap();
        assert!(entry.active);
        assert_eq!(entry.soft, 4096);
    }

    #[test]
    fn find_mut_returns_none_for_unknown_name() {
        let mut catalog = new_catalog();
        assert!(find_mut(&mut catalog, "NOT_A_LIMIT").is_none());
    }
}
