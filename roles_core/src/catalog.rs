use crate::config::RoleFileConfig;
use crate::role::{RoleDefinition, RoleId};
use crate::{ConfigError, RoleError};
use std::path::Path;
use tracing::{debug, info};

/// Registry of all known roles
///
/// Owned by the simulation context rather than held in a global. Lookups are
/// linear scans; catalogs hold tens of roles, not thousands.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all role files from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_dir(dir)?;
        Ok(catalog)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        // Sorted so duplicate errors are reported deterministically
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml" || ext == "json") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: RoleFileConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Json {
                error: e,
                path: path.to_path_buf(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                error: e,
                path: path.to_path_buf(),
            })?
        };

        config.validate().map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;

        for role in config.roles {
            self.register(role).map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;
        }
        Ok(())
    }

    /// Add a role definition
    ///
    /// Registering an identical definition again is a no-op. A different
    /// definition reusing an id or name is rejected.
    pub fn register(&mut self, role: RoleDefinition) -> Result<(), RoleError> {
        if let Some(existing) = self.get(role.id) {
            if *existing == role {
                debug!(role = %role.name, id = %role.id, "role already registered");
                return Ok(());
            }
            return Err(RoleError::DuplicateId(role.id));
        }
        if self.find_by_name(&role.name).is_some() {
            return Err(RoleError::DuplicateName(role.name));
        }

        info!(role = %role.name, id = %role.id, "registered role");
        self.roles.push(role);
        Ok(())
    }

    /// Remove a role definition, returning it if it was present
    pub fn unregister(&mut self, id: RoleId) -> Option<RoleDefinition> {
        let index = self.roles.iter().position(|r| r.id == id)?;
        let role = self.roles.remove(index);
        info!(role = %role.name, id = %role.id, "unregistered role");
        Some(role)
    }

    /// Get a role by id
    pub fn get(&self, id: RoleId) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Get a role by name
    pub fn find_by_name(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Resolve a role by id, failing if it is unknown
    pub fn resolve(&self, id: RoleId) -> Result<&RoleDefinition, RoleError> {
        self.get(id).ok_or(RoleError::UnknownRole(id))
    }

    /// Resolve a role by name, failing if it is unknown
    pub fn resolve_name(&self, name: &str) -> Result<&RoleDefinition, RoleError> {
        self.find_by_name(name)
            .ok_or_else(|| RoleError::UnknownRoleName(name.to_string()))
    }

    /// Check if a role id is registered
    pub fn contains(&self, id: RoleId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate all registered roles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
