use std::fmt;

/// Failure while emitting the deployment descriptor.
#[derive(Debug)]
pub enum DeployError {
    /// The target path does not end in `.yml`.
    NotYaml,
    /// A route names an authorizer absent from the provider configuration.
    UnknownAuthorizer { name: String },
    Serialize(serde_yaml::Error),
    Io(std::io::Error),
}

impl fmt::Display for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::NotYaml => write!(f, "File is not YAML file."),
            DeployError::UnknownAuthorizer { name } => {
                write!(f, "Authorizer {name} not defined")
            }
            DeployError::Serialize(e) => write!(f, "failed to serialize descriptor: {e}"),
            DeployError::Io(e) => write!(f, "failed to write descriptor: {e}"),
        }
    }
}

impl std::error::Error for DeployError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeployError::Serialize(e) => Some(e),
            DeployError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for DeployError {
    fn from(e: serde_yaml::Error) -> Self {
        DeployError::Serialize(e)
    }
}

impl From<std::io::Error> for DeployError {
    fn from(e: std::io::Error) -> Self {
        DeployError::Io(e)
    }
}
