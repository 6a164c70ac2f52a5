//! Cross-layer traits.

use async_trait::async_trait;

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }

    /// Short label for probe responses.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "up",
            Self::Degraded(_) => "degraded",
            Self::Unhealthy(_) => "down",
        }
    }

    /// Reason given by a degraded or unhealthy component.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Degraded(msg) | Self::Unhealthy(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_and_messages() {
        assert_eq!(HealthStatus::Healthy.label(), "up");
        assert_eq!(HealthStatus::Healthy.message(), None);

        let degraded = HealthStatus::Degraded("cache disabled".into());
        assert_eq!(degraded.label(), "degraded");
        assert!(!degraded.is_unhealthy());

        let down = HealthStatus::Unhealthy("connection refused".into());
        assert_eq!(down.message(), Some("connection refused"));
        assert!(down.is_unhealthy());
    }
}
