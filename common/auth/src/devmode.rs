/// The default issuer when using `--devmode`.
pub const ISSUER_URL: &str = "http://localhost:8090/realms/vocero";

/// The default client id for the frontend
pub const FRONTEND_CLIENT_ID: &str = "frontend";

/// The default "service" client ID for devmode
pub const SERVICE_CLIENT_ID: &str = "testing-manager";

pub const PUBLIC_CLIENT_IDS: &[&str] = &[FRONTEND_CLIENT_ID];
pub const CONFIDENTIAL_CLIENT_IDS: &[&str] = &["testing-user", SERVICE_CLIENT_ID];

/// The clients which will be accepted by services when running with `--devmode`.
///
/// This also includes the "testing" clients, as this allows running the testsuite against an
/// already spun-up set of services.
pub const CLIENT_IDS: &[&str] = &[FRONTEND_CLIENT_ID, "testing-user", SERVICE_CLIENT_ID];

/// Get the issuer URL for `--devmode`.
///
/// This can be either the value of [`ISSUER_URL`], or it can be overridden using the environment
/// variable `ISSUER_URL`.
pub fn issuer_url() -> String {
    std::env::var("VOCERO_ISSUER_URL").unwrap_or_else(|_| ISSUER_URL.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    /// Ensure that `CLIENT_IDS` is a union of public and confidential client IDs.
    ///
    /// As we can't have a const way of creating a union of slices (without any additional
    /// dependency), we simply use a test to ensure this.
    #[test]
    fn test_client_id_union() {
        assert_eq!(
            CLIENT_IDS,
            PUBLIC_CLIENT_IDS
                .iter()
                .chain(CONFIDENTIAL_CLIENT_IDS.iter())
                .copied()
                .collect::<Vec<&str>>()
        )
    }
}
