#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Voice platform")]
#[group(id = "platform")]
pub struct PlatformConfig {
    /// Base URL of the voice platform API
    #[arg(
        id = "platform-url",
        long,
        env = "PLATFORM_URL",
        default_value = "https://api.voicelayer.ai/"
    )]
    pub url: String,

    /// API token for the voice platform
    #[arg(id = "platform-token", long, env = "PLATFORM_TOKEN")]
    pub token: Option<String>,

    /// Request timeout, in seconds
    #[arg(
        id = "platform-timeout",
        long,
        env = "PLATFORM_TIMEOUT",
        default_value_t = 30
    )]
    pub timeout: u64,
}
