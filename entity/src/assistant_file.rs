use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assistant_file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub assistant_id: Uuid,
    pub user_id: String,

    pub file_name: String,
    pub content_type: String,
    pub size: i64,

    /// the identifier assigned by the external voice platform
    pub platform_file_id: String,

    /// set once the platform reports the file as ingested
    pub processed: bool,

    pub created_at: time::OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assistant::Entity",
        from = "Column::AssistantId",
        to = "super::assistant::Column::Id"
    )]
    Assistant,
}

impl Related<super::assistant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assistant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
