use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub client_name: String,
    pub consultant: String,
    pub pm: String,
    pub country: String,
    pub opportunity_number: Option<String>,
    pub opportunity_value: Option<f64>,
    pub planned_hours: f64,
    pub executed_hours: f64,
    pub hourly_rate: f64,
    pub start_date: TimeDate,
    pub end_date: TimeDate,
    pub completed: bool,
    pub visible: bool,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::observation::Entity")]
    Observations,
}

impl Related<super::observation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Observations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
