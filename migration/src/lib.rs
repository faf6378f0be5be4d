pub use sea_orm_migration::prelude::*;

mod m0000010_create_assistant;
mod m0000020_create_embed_mapping;
mod m0000030_create_scraped_website;
mod m0000040_create_assistant_file;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0000010_create_assistant::Migration),
            Box::new(m0000020_create_embed_mapping::Migration),
            Box::new(m0000030_create_scraped_website::Migration),
            Box::new(m0000040_create_assistant_file::Migration),
        ]
    }
}

pub struct Now;

impl Iden for Now {
    fn unquoted(&self, s: &mut dyn Write) {
        write!(s, "now").unwrap()
    }
}

pub struct UuidV4;

impl Iden for UuidV4 {
    fn unquoted(&self, s: &mut dyn Write) {
        write!(s, "gen_random_uuid").unwrap()
    }
}
