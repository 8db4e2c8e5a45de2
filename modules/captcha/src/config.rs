use std::path::PathBuf;
use image::Rgba;
use serde::{Deserialize, Serialize};
use error::{ConfigError, Result};
use crate::filters::{Block, DEFAULT_BLOCK_SIZE, Filter, FishEye};

/// Contain the renderers to build and their parameters
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererConfig {
    pub block: Option<BlockConfig>,
    pub fisheye: Option<FishEyeConfig>
}

impl RendererConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::InvalidFile(format!("{e}")).into())
    }

    /// Build the configured renderers, the block one first.
    pub fn filters(&self) -> Result<Vec<Box<dyn Filter>>> {
        let mut filters: Vec<Box<dyn Filter>> = Vec::new();

        if let Some(block) = &self.block {
            filters.push(Box::new(block.build()?));
        }
        if let Some(fisheye) = &self.fisheye {
            filters.push(Box::new(fisheye.build()));
        }

        Ok(filters)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BlockConfig {
    pub block_size: u32
}

impl BlockConfig {
    pub fn build(&self) -> Result<Block> {
        Block::new(self.block_size)
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self { block_size: DEFAULT_BLOCK_SIZE }
    }
}

/// Colors are RGBA quadruplets
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FishEyeConfig {
    pub horizontal_color: [u8; 4],
    pub vertical_color: [u8; 4]
}

impl FishEyeConfig {
    pub fn build(&self) -> FishEye {
        FishEye::new(Rgba(self.horizontal_color), Rgba(self.vertical_color))
    }
}

impl Default for FishEyeConfig {
    fn default() -> Self {
        let black = crate::images::BLACK.0;
        Self { horizontal_color: black, vertical_color: black }
    }
}

pub fn load_from(path: impl Into<PathBuf>) -> Result<RendererConfig> {
    let path = path.into();

    let content: String = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Err(ConfigError::CannotReadFile(path.to_string_lossy().to_string()).into())
    };

    match toml::from_str(content.as_str()) {
        Ok(config) => Ok(config),
        Err(e) => Err(ConfigError::InvalidFile(format!("{path:?} ({e})")).into())
    }
}
