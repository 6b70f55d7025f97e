//! Application Configuration
//!
//! Configuration for the provisioning application layer.

use platform::password::DEFAULT_PASSWORD_LENGTH;

#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Length of generated passwords
    pub password_length: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            password_pepper: None,
        }
    }
}

impl ProvisioningConfig {
    /// Config for local development (no pepper)
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_pepper(pepper: Vec<u8>) -> Self {
        Self {
            password_pepper: Some(pepper),
            ..Self::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProvisioningConfig::default();
        assert_eq!(config.password_length, 12);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_with_pepper() {
        let config = ProvisioningConfig::with_pepper(b"pepper".to_vec());
        assert_eq!(config.pepper(), Some(&b"pepper"[..]));
    }
}
