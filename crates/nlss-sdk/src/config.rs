use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_PRESET_FOLDER: &str = "PRESET_FOLDER";
pub const ENV_BASE_PATH: &str = "NLSS_BASE_PATH";
pub const ENV_NODE_NAME: &str = "NLSS_NODE_NAME";
pub const ENV_DID_IMAGE_NAME: &str = "NLSS_DID_IMAGE_NAME";
pub const ENV_PUB_SHARE_NAME: &str = "NLSS_PUB_SHARE_NAME";
pub const ENV_OUTPUT_DIR: &str = "NLSS_OUTPUT_DIR";

/// File name of every reconstructed private share.
pub const PRIVATE_SHARE_FILE: &str = "pvtShare.png";

/// Where share images are found and where reconstructed shares go.
///
/// Node-layout DIDs live under `{base_path}/{node_name}/Rubix/{did}/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlssConfig {
    pub preset_folder: PathBuf,
    pub base_path: Option<PathBuf>,
    pub node_name: Option<String>,
    pub did_image_name: String,
    pub pub_share_name: String,
    pub output_dir: PathBuf,
}

impl Default for NlssConfig {
    fn default() -> Self {
        Self {
            preset_folder: PathBuf::from("preset"),
            base_path: None,
            node_name: None,
            did_image_name: "did.png".into(),
            pub_share_name: "pubShare.png".into(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl NlssConfig {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Empty values count as unset.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = get(ENV_PRESET_FOLDER) {
            self.preset_folder = v.into();
        }
        if let Some(v) = get(ENV_BASE_PATH) {
            self.base_path = Some(v.into());
        }
        if let Some(v) = get(ENV_NODE_NAME) {
            self.node_name = Some(v);
        }
        if let Some(v) = get(ENV_DID_IMAGE_NAME) {
            self.did_image_name = v;
        }
        if let Some(v) = get(ENV_PUB_SHARE_NAME) {
            self.pub_share_name = v;
        }
        if let Some(v) = get(ENV_OUTPUT_DIR) {
            self.output_dir = v.into();
        }
    }

    pub fn preset_private_share(&self) -> PathBuf {
        self.preset_folder.join("PrivateShare.png")
    }

    pub fn preset_public_share(&self) -> PathBuf {
        self.preset_folder.join("PublicShare.png")
    }

    pub fn preset_did_image(&self) -> PathBuf {
        self.preset_folder.join("DID.png")
    }

    /// The node directory holding a DID's images.
    pub fn did_dir(&self, did: &str) -> Result<PathBuf, ConfigError> {
        let base = self
            .base_path
            .as_ref()
            .ok_or(ConfigError::Missing("base path"))?;
        let node = self
            .node_name
            .as_ref()
            .ok_or(ConfigError::Missing("node name"))?;
        Ok(base.join(node).join("Rubix").join(did))
    }

    /// DID image and public share paths for `did`, in that order.
    pub fn image_paths(&self, did: &str) -> Result<(PathBuf, PathBuf), ConfigError> {
        let dir = self.did_dir(did)?;
        Ok((
            dir.join(&self.did_image_name),
            dir.join(&self.pub_share_name),
        ))
    }

    pub fn output_path(&self, did: &str) -> PathBuf {
        self.output_dir.join(did).join(PRIVATE_SHARE_FILE)
    }
}
