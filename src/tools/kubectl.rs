//! Cluster commands through `kubectl`

use crate::config::DeploymentTarget;
use crate::error::{ReleaseError, Result};
use crate::runner::CommandSpec;
use serde::Deserialize;

pub fn set_image_command(
    target: &DeploymentTarget<'_>,
    container: &str,
    image: &str,
) -> CommandSpec {
    CommandSpec::new("kubectl").args([
        "set".to_string(),
        "image".to_string(),
        format!("deployment/{}", target.project_name),
        format!("{}={}", container, image),
        format!("--namespace={}", target.namespace),
    ])
}

/// Deployment status as JSON; stdout is captured for parsing
pub fn get_deployment_command(target: &DeploymentTarget<'_>) -> CommandSpec {
    CommandSpec::new("kubectl")
        .args([
            "get".to_string(),
            format!("deployment/{}", target.project_name),
            "--output=json".to_string(),
            format!("--namespace={}", target.namespace),
        ])
        .capture_stdout()
}

#[derive(Debug, Deserialize)]
struct Deployment {
    spec: DeploymentSpec,
}

#[derive(Debug, Deserialize)]
struct DeploymentSpec {
    template: PodTemplate,
}

#[derive(Debug, Deserialize)]
struct PodTemplate {
    spec: PodSpec,
}

#[derive(Debug, Deserialize)]
struct PodSpec {
    #[serde(default)]
    containers: Vec<Container>,
}

#[derive(Debug, Deserialize)]
struct Container {
    name: String,
    image: String,
}

/// Image found in a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveImage {
    pub image: String,
    pub container: String,
    /// False when the named container was absent and the first one was used
    pub matched: bool,
}

/// Extract the running image from `kubectl get deployment -o json`
///
/// Prefers the container called `container`; otherwise falls back to the
/// first container in the pod template.
pub fn parse_live_image(json: &str, container: &str) -> Result<LiveImage> {
    let deployment: Deployment = serde_json::from_str(json)
        .map_err(|e| ReleaseError::output(format!("deployment JSON: {}", e)))?;
    let containers = deployment.spec.template.spec.containers;

    if let Some(found) = containers.iter().find(|c| c.name == container) {
        return Ok(LiveImage {
            image: found.image.clone(),
            container: found.name.clone(),
            matched: true,
        });
    }

    containers
        .into_iter()
        .next()
        .map(|first| LiveImage {
            image: first.image,
            container: first.name,
            matched: false,
        })
        .ok_or_else(|| ReleaseError::output("deployment has no containers"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: DeploymentTarget<'static> = DeploymentTarget {
        project_name: "docs",
        namespace: "prod",
    };

    const DEPLOYMENT: &str = r#"{
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "spec": {
            "replicas": 2,
            "template": {
                "spec": {
                    "containers": [
                        {"name": "sidecar", "image": "envoy:1.29"},
                        {"name": "docs-server", "image": "gcr.io/p/docs:v1.4.0"}
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn test_set_image_command() {
        assert_eq!(
            set_image_command(&TARGET, "docs-server", "gcr.io/p/docs:v1.4.1").command_line(),
            "kubectl set image deployment/docs docs-server=gcr.io/p/docs:v1.4.1 --namespace=prod"
        );
    }

    #[test]
    fn test_get_deployment_command_captures_stdout() {
        let cmd = get_deployment_command(&TARGET);
        assert_eq!(
            cmd.command_line(),
            "kubectl get deployment/docs --output=json --namespace=prod"
        );
        assert!(cmd.read_only);
    }

    #[test]
    fn test_parse_live_image_named_container() {
        let live = parse_live_image(DEPLOYMENT, "docs-server").unwrap();
        assert_eq!(live.image, "gcr.io/p/docs:v1.4.0");
        assert!(live.matched);
    }

    #[test]
    fn test_parse_live_image_falls_back_to_first() {
        let live = parse_live_image(DEPLOYMENT, "web").unwrap();
        assert_eq!(live.image, "envoy:1.29");
        assert_eq!(live.container, "sidecar");
        assert!(!live.matched);
    }

    #[test]
    fn test_parse_live_image_errors() {
        assert!(parse_live_image("not json", "docs-server").is_err());
        let empty = r#"{"spec": {"template": {"spec": {"containers": []}}}}"#;
        assert!(matches!(
            parse_live_image(empty, "docs-server"),
            Err(ReleaseError::UnexpectedOutput(_))
        ));
    }
}
