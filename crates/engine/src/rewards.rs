//! The reward catalog.
//!
//! Redemption side effects key off the explicit [`ItemKind`] tag, not the
//! display name, so renaming an item can never change what it does. The engine
//! seeds a single system item of kind `Freeze` at first startup; everything
//! created through the catalog API is `Generic`.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Display name of the seeded streak-freeze item.
pub const FREEZE_CARD_NAME: &str = "Streak Freeze Card";

/// What redeeming an item does besides spending energy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Grants one streak freeze on redemption.
    Freeze,
    /// No side effect.
    Generic,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Freeze => "freeze",
            ItemKind::Generic => "generic",
        }
    }
}

impl TryFrom<&str> for ItemKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "freeze" => Ok(ItemKind::Freeze),
            "generic" => Ok(ItemKind::Generic),
            other => Err(EngineError::InvalidId(format!("unknown item kind {other}"))),
        }
    }
}

/// A redeemable catalog item. Never updated or deleted by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    pub id: Uuid,
    pub name: String,
    pub cost: f64,
    pub description: Option<String>,
    pub kind: ItemKind,
    pub is_system_item: bool,
}

impl RewardItem {
    /// A user-defined reward. Duplicate names are allowed and never merged.
    pub fn new(name: String, cost: f64, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            cost,
            description,
            kind: ItemKind::Generic,
            is_system_item: false,
        }
    }

    /// The system item seeded at first startup.
    pub fn freeze_card() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: FREEZE_CARD_NAME.to_string(),
            cost: 30.0,
            description: Some("Consumed automatically to protect the streak on a missed day".to_string()),
            kind: ItemKind::Freeze,
            is_system_item: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reward_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub description: Option<String>,
    pub kind: String,
    pub is_system_item: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&RewardItem> for ActiveModel {
    fn from(item: &RewardItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            name: ActiveValue::Set(item.name.clone()),
            cost: ActiveValue::Set(item.cost),
            description: ActiveValue::Set(item.description.clone()),
            kind: ActiveValue::Set(item.kind.as_str().to_string()),
            is_system_item: ActiveValue::Set(item.is_system_item),
        }
    }
}

impl TryFrom<Model> for RewardItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|_| EngineError::InvalidId(model.id.clone()))?;
        let kind = ItemKind::try_from(model.kind.as_str())?;

        Ok(Self {
            id,
            name: model.name,
            cost: model.cost,
            description: model.description,
            kind,
            is_system_item: model.is_system_item,
        })
    }
}
