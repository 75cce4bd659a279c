use clap::Parser;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_UPLOADS: usize = 1000;
pub const DEFAULT_MAX_ARRANGEMENTS: usize = 1000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_MAX_ROOMS: usize = 500;
pub const DEFAULT_MAX_SEATS_PER_ROOM: usize = 1000;
pub const DEFAULT_MAX_SAMPLE_COUNT: usize = 10_000;

/// Runtime settings for the HTTP service.
///
/// Every flag can also be given through its `SEATING_*` environment
/// variable. Values that do not parse are rejected at startup.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "seating-planner")]
#[command(about = "Exam seating planner HTTP service")]
pub struct ServerConfig {
    /// Address the listener binds to
    #[arg(long, env = "SEATING_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Uploaded rosters kept before the oldest are dropped
    #[arg(long, env = "SEATING_MAX_UPLOADS", default_value_t = DEFAULT_MAX_UPLOADS)]
    pub max_uploads: usize,

    /// Finished arrangements kept for download
    #[arg(long, env = "SEATING_MAX_ARRANGEMENTS", default_value_t = DEFAULT_MAX_ARRANGEMENTS)]
    pub max_arrangements: usize,

    /// Request body limit for roster uploads, in bytes
    #[arg(long, env = "SEATING_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Largest room count an arrangement request may ask for
    #[arg(long, env = "SEATING_MAX_ROOMS", default_value_t = DEFAULT_MAX_ROOMS)]
    pub max_rooms: usize,

    /// Largest seats-per-room an arrangement request may ask for
    #[arg(
        long,
        env = "SEATING_MAX_SEATS_PER_ROOM",
        default_value_t = DEFAULT_MAX_SEATS_PER_ROOM
    )]
    pub max_seats_per_room: usize,

    /// Largest generated sample roster
    #[arg(long, env = "SEATING_MAX_SAMPLE_COUNT", default_value_t = DEFAULT_MAX_SAMPLE_COUNT)]
    pub max_sample_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_uploads: DEFAULT_MAX_UPLOADS,
            max_arrangements: DEFAULT_MAX_ARRANGEMENTS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_rooms: DEFAULT_MAX_ROOMS,
            max_seats_per_room: DEFAULT_MAX_SEATS_PER_ROOM,
            max_sample_count: DEFAULT_MAX_SAMPLE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "seating-planner",
            "--bind-addr",
            "0.0.0.0:9000",
            "--max-uploads",
            "10",
            "--max-rooms",
            "12",
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.max_uploads, 10);
        assert_eq!(config.max_rooms, 12);
        assert_eq!(config.max_arrangements, DEFAULT_MAX_ARRANGEMENTS);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result =
            ServerConfig::try_parse_from(["seating-planner", "--max-upload-bytes", "lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        ServerConfig::command().debug_assert();
    }
}
