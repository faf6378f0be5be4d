use std::collections::HashMap;

/// A convenience function to get the default scopes in an allocated form.
pub fn default_scope_mappings() -> HashMap<String, Vec<String>> {
    DEFAULT_SCOPE_MAPPINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(ToString::to_string).collect()))
        .collect()
}

/// Default scope mappings (in a `const` form).
///
/// See [`default_scope_mappings`] for a `HashMap` form.
///
/// This should be aligned with the default Keycloak configuration we use for local deployments.
/// It can be overridden by configuration.
pub const DEFAULT_SCOPE_MAPPINGS: &[(&str, &[&str])] = &[
    (
        "read:workspace",
        &[
            "read.assistant",
            "read.file",
            "read.embed",
            "read.scrape",
        ],
    ),
    (
        "manage:workspace",
        &[
            "create.assistant",
            "update.assistant",
            "delete.assistant",
            "create.file",
            "delete.file",
            "create.embed",
            "update.embed",
            "delete.embed",
            "create.scrape",
        ],
    ),
    ("run:call", &["start.call", "stop.call"]),
];
