use std::fmt;

/// Non-fatal conditions at the edges of a task that the operator should see.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tags exist yet; the release starts from the seed version
    NoVersionHistory { seed: String },
    /// The configured container was missing from the deployment
    ContainerNotFound {
        expected: String,
        used: String,
        deployment: String,
    },
    /// Dry run: side-effecting commands are printed, not executed
    DryRun,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionHistory { seed } => {
                write!(
                    f,
                    "No version tags found; starting release history at {}",
                    seed
                )
            }
            BoundaryWarning::ContainerNotFound {
                expected,
                used,
                deployment,
            } => {
                write!(
                    f,
                    "Container '{}' not found in deployment '{}'; reporting '{}' instead",
                    expected, deployment, used
                )
            }
            BoundaryWarning::DryRun => {
                write!(f, "Dry run: build, push, tag and deploy commands will not run")
            }
        }
    }
}
