use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assistant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: String,

    /// the identifier assigned by the external voice platform
    pub platform_assistant_id: String,

    pub name: String,
    pub welcome_message: String,
    pub system_prompt: String,
    pub language: String,
    pub voice_id: String,

    /// widget placement, e.g. `bottom-right`
    pub position: String,
    pub theme: String,
    pub active: bool,

    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assistant_file::Entity")]
    File,
    #[sea_orm(has_many = "super::embed_mapping::Entity")]
    EmbedMapping,
    #[sea_orm(has_many = "super::scraped_website::Entity")]
    ScrapedWebsite,
}

impl Related<super::assistant_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::File.def()
    }
}

impl Related<super::embed_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmbedMapping.def()
    }
}

impl Related<super::scraped_website::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScrapedWebsite.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
