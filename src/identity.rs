//! Owner and group name resolution.

use uzers::{Groups, Users, UsersCache};

/// Maps numeric owner/group ids to display names.
///
/// Implementations never fail: an id with no passwd/group record is shown
/// as its decimal form.
pub trait IdentityResolver {
    fn owner(&self, uid: u32) -> String;
    fn group(&self, gid: u32) -> String;
}

/// Resolver backed by the system user and group databases. Lookups are
/// cached for the lifetime of the value.
pub struct SystemIdentity {
    cache: UsersCache,
}

impl SystemIdentity {
    pub fn new() -> Self {
        Self {
            cache: UsersCache::new(),
        }
    }
}

impl Default for SystemIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityResolver for SystemIdentity {
    fn owner(&self, uid: u32) -> String {
        self.cache
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().to_string())
            .unwrap_or_else(|| uid.to_string())
    }

    fn group(&self, gid: u32) -> String {
        self.cache
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().to_string())
            .unwrap_or_else(|| gid.to_string())
    }
}

/// Resolver that never consults the system databases.
pub struct NumericIdentity;

impl IdentityResolver for NumericIdentity {
    fn owner(&self, uid: u32) -> String {
        uid.to_string()
    }

    fn group(&self, gid: u32) -> String {
        gid.to_string()
    }
}
