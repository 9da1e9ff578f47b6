//! In-memory directory for tests, here and in dependent crates.
//!
//! Enabled for other crates with the `test-support` feature.

#![allow(clippy::unwrap_used, clippy::must_use_candidate)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use azgit_devops::{
    EntitlementApi, GraphApi, GraphGroup, GraphUser, GroupEntitlement, Result, SubjectQuery,
    UserEntitlement,
};

/// Graph and entitlement directory backed by vectors, counting fetches.
#[derive(Default)]
pub struct MockDirectory {
    users: Vec<GraphUser>,
    groups: Vec<GraphGroup>,
    entitlements: Vec<UserEntitlement>,
    fail_entitlements: bool,
    fail_groups: bool,
    user_fetches: AtomicUsize,
    group_fetches: AtomicUsize,
    searches: Mutex<Vec<String>>,
    last_scope: Mutex<Option<String>>,
}

fn user(name: &str, origin: &str, origin_id: &str) -> GraphUser {
    GraphUser {
        display_name: name.to_string(),
        origin_id: origin_id.to_string(),
        descriptor: format!("{origin}.{origin_id}"),
        origin: origin.to_string(),
        principal_name: None,
        mail_address: None,
    }
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, name: &str, origin: &str, origin_id: &str) -> Self {
        self.users.push(user(name, origin, origin_id));
        self
    }

    pub fn with_group(mut self, name: &str, origin_id: &str) -> Self {
        self.groups.push(GraphGroup {
            display_name: name.to_string(),
            origin_id: origin_id.to_string(),
            descriptor: format!("vssgp.{origin_id}"),
            origin: "vsts".to_string(),
            principal_name: None,
        });
        self
    }

    pub fn with_entitlement(mut self, id: &str, name: &str) -> Self {
        self.entitlements.push(UserEntitlement {
            id: id.to_string(),
            user: user(name, "aad", "entitled"),
            access_level: None,
            date_created: None,
            last_accessed_date: None,
        });
        self
    }

    pub const fn with_failing_entitlements(mut self) -> Self {
        self.fail_entitlements = true;
        self
    }

    /// Every group listing fails, after being counted.
    pub const fn with_failing_groups(mut self) -> Self {
        self.fail_groups = true;
        self
    }

    pub fn user_fetches(&self) -> usize {
        self.user_fetches.load(Ordering::SeqCst)
    }

    pub fn group_fetches(&self) -> usize {
        self.group_fetches.load(Ordering::SeqCst)
    }

    pub fn entitlement_searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn last_scope(&self) -> Option<String> {
        self.last_scope.lock().unwrap().clone()
    }
}

impl GraphApi for MockDirectory {
    async fn list_users(&self, query: &SubjectQuery) -> Result<Vec<GraphUser>> {
        self.user_fetches.fetch_add(1, Ordering::SeqCst);
        self.last_scope.lock().unwrap().clone_from(&query.scope_descriptor);
        Ok(self.users.clone())
    }

    async fn list_groups(&self, query: &SubjectQuery) -> Result<Vec<GraphGroup>> {
        self.group_fetches.fetch_add(1, Ordering::SeqCst);
        self.last_scope.lock().unwrap().clone_from(&query.scope_descriptor);
        if self.fail_groups {
            return Err(azgit_devops::Error::ApiError {
                status: 403,
                message: "graph unavailable".into(),
            });
        }
        Ok(self.groups.clone())
    }

    async fn get_descriptor(&self, storage_key: &str) -> Result<String> {
        Ok(format!("scp.{storage_key}"))
    }
}

impl EntitlementApi for MockDirectory {
    async fn search_user_entitlements(&self, name: Option<&str>) -> Result<Vec<UserEntitlement>> {
        if let Some(name) = name {
            self.searches.lock().unwrap().push(name.to_string());
        }
        if self.fail_entitlements {
            return Err(azgit_devops::Error::ApiError {
                status: 500,
                message: "entitlement service unavailable".into(),
            });
        }
        // The service filter is a prefix search, so near matches come back too.
        Ok(self
            .entitlements
            .iter()
            .filter(|e| name.is_none_or(|n| e.user.display_name.starts_with(n)))
            .cloned()
            .collect())
    }

    async fn list_group_entitlements(&self) -> Result<Vec<GroupEntitlement>> {
        Ok(Vec::new())
    }
}
