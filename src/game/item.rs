use std::str::FromStr;

use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::grapple::ItemConfig;

/// Item materials a grapple can be made from, named as the host names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemMaterial {
    FishingRod,
    CarrotOnAStick,
    WarpedFungusOnAStick,
    Stick,
    BlazeRod,
    Bow,
    Crossbow,
    Trident,
    Lead,
    TripwireHook,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid material '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for ItemMaterial {
    type Err = UnknownMaterial;

    /// Exact, case-sensitive match on the host name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
            .map_err(|_: serde::de::value::Error| UnknownMaterial(s.to_string()))
    }
}

/// Snapshot of an inventory stack as the host sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub material: ItemMaterial,
    /// Display-name override, if any. Colour codes already resolved.
    pub display_name: Option<String>,
    pub lore: Vec<String>,
}

impl ItemDescriptor {
    pub fn plain(material: ItemMaterial) -> Self {
        Self {
            material,
            display_name: None,
            lore: Vec::new(),
        }
    }

    pub fn named(material: ItemMaterial, name: impl Into<String>) -> Self {
        Self {
            material,
            display_name: Some(name.into()),
            lore: Vec::new(),
        }
    }
}

/// Decides whether an item counts as a grapple.
pub trait HookItemIdentity: Send + Sync {
    fn is_grapple(&self, item: Option<&ItemDescriptor>, cfg: &ItemConfig) -> bool;
}

/// Material plus exact display name. Any stack that matches both is a
/// grapple, however it was obtained.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayNameIdentity;

impl HookItemIdentity for DisplayNameIdentity {
    fn is_grapple(&self, item: Option<&ItemDescriptor>, cfg: &ItemConfig) -> bool {
        let Some(item) = item else {
            return false;
        };
        let Some(material) = cfg.material else {
            return false;
        };
        if item.material != material {
            return false;
        }
        item.display_name.as_deref() == Some(cfg.display_name.as_str())
    }
}

/// Build a stack that `DisplayNameIdentity` accepts.
pub fn create_grapple_item(cfg: &ItemConfig) -> Option<ItemDescriptor> {
    let material = cfg.material?;
    Some(ItemDescriptor {
        material,
        display_name: Some(cfg.display_name.clone()),
        lore: cfg.lore.clone(),
    })
}
