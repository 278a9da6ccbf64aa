//! In-memory organizational directory

use portal_core::{DirectoryError, DirectoryLookup, Group};

#[derive(Debug, Clone)]
struct Membership {
    identity: String,
    membership_type: String,
    group_id: String,
}

/// Directory of groups and memberships, reported in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    groups: Vec<String>,
    memberships: Vec<Membership>,
    unavailable: Option<String>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group; the id is stored verbatim.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        if !self.groups.contains(&group_id) {
            self.groups.push(group_id);
        }
        self
    }

    /// Add a membership, registering the group if needed.
    pub fn with_membership(
        self,
        identity: impl Into<String>,
        membership_type: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        let group_id = group_id.into();
        let mut directory = self.with_group(group_id.clone());
        directory.memberships.push(Membership {
            identity: identity.into(),
            membership_type: membership_type.into(),
            group_id,
        });
        directory
    }

    /// Make every lookup fail.
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.unavailable = Some(message.into());
        self
    }

    fn check_available(&self) -> Result<(), DirectoryError> {
        match &self.unavailable {
            Some(message) => Err(DirectoryError::unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn distinct_groups<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<Group> {
        let mut seen: Vec<&str> = Vec::new();
        for id in ids {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen.into_iter().map(Group::new).collect()
    }
}

impl DirectoryLookup for MemoryDirectory {
    fn all_groups(&self) -> Result<Vec<Group>, DirectoryError> {
        self.check_available()?;
        Ok(self.groups.iter().map(Group::new).collect())
    }

    fn groups_of(&self, identity: &str) -> Result<Vec<Group>, DirectoryError> {
        self.check_available()?;
        Ok(Self::distinct_groups(
            self.memberships
                .iter()
                .filter(|m| m.identity == identity)
                .map(|m| m.group_id.as_str()),
        ))
    }

    fn groups_by_membership(
        &self,
        identity: &str,
        membership_type: &str,
    ) -> Result<Vec<Group>, DirectoryError> {
        self.check_available()?;
        Ok(Self::distinct_groups(
            self.memberships
                .iter()
                .filter(|m| m.identity == identity && m.membership_type == membership_type)
                .map(|m| m.group_id.as_str()),
        ))
    }
}
