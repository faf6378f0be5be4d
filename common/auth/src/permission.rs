use crate::{
    authenticator::user::UserInformation,
    authorizer::{Authorizer, Requirement, RequirementError},
};
use strum::ParseError;

macro_rules! permission {
    (
        $(#[$enum_meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        // Define the enum itself
        $(#[$enum_meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        $(
            pub struct $variant;

            impl Requirement for $variant {
                fn enforce(authorizer: &Authorizer, user: &UserInformation) -> Result<(), RequirementError> {
                    Ok(authorizer.require(user, Permission::$variant)?)
                }
            }

        )*
    };
}

permission! {
    #[derive(
        Copy,
        Clone,
        PartialEq,
        Eq,
        Debug,
        serde::Deserialize,
        serde::Serialize,
        Hash,
        schemars::JsonSchema,
        strum::AsRefStr,
        strum::Display,
        strum::EnumString,
        strum::IntoStaticStr,
    )]
    #[serde(into = "String")]
    #[serde(try_from = "String")]
    pub enum Permission {
        #[strum(serialize = "create.assistant")]
        CreateAssistant,
        #[strum(serialize = "read.assistant")]
        ReadAssistant,
        #[strum(serialize = "update.assistant")]
        UpdateAssistant,
        #[strum(serialize = "delete.assistant")]
        DeleteAssistant,

        #[strum(serialize = "create.file")]
        CreateFile,
        #[strum(serialize = "read.file")]
        ReadFile,
        #[strum(serialize = "delete.file")]
        DeleteFile,

        #[strum(serialize = "create.embed")]
        CreateEmbed,
        #[strum(serialize = "read.embed")]
        ReadEmbed,
        #[strum(serialize = "update.embed")]
        UpdateEmbed,
        #[strum(serialize = "delete.embed")]
        DeleteEmbed,

        #[strum(serialize = "start.call")]
        StartCall,
        #[strum(serialize = "stop.call")]
        StopCall,

        #[strum(serialize = "create.scrape")]
        CreateScrape,
        #[strum(serialize = "read.scrape")]
        ReadScrape,
    }
}

impl TryFrom<String> for Permission {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serde() {
        assert_eq!(
            json!("read.assistant"),
            serde_json::to_value(Permission::ReadAssistant).unwrap(),
        );
        assert_eq!(
            Permission::ReadAssistant,
            serde_json::from_value(json!("read.assistant")).unwrap(),
        );
    }

    #[test]
    fn parse() {
        assert_eq!(Permission::StartCall, "start.call".try_into().unwrap());
        assert!(Permission::try_from("call.everyone".to_string()).is_err());
    }
}
