use crate::role::RoleDefinition;
use serde::Deserialize;

/// Contents of a role definition file (TOML `[[roles]]` or JSON `{"roles": [...]}`)
#[derive(Debug, Deserialize)]
pub struct RoleFileConfig {
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

impl RoleFileConfig {
    /// Reject values that would break health clamping
    pub fn validate(&self) -> Result<(), String> {
        for role in &self.roles {
            if role.name.trim().is_empty() {
                return Err(format!("role {} has an empty name", role.id));
            }
            if let Some(max) = role.max_health {
                if !max.is_finite() || max < 0.0 {
                    return Err(format!("role '{}' has invalid max_health {}", role.name, max));
                }
            }
            if let Some(damage) = &role.damage {
                if damage.multiplier < 0.0 {
                    return Err(format!(
                        "role '{}' has negative damage multiplier {}",
                        role.name, damage.multiplier
                    ));
                }
            }
        }
        Ok(())
    }
}
