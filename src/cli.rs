use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "logshot")]
#[command(about = "Read-only HTTP gateway for pod listings and pod log tails")]
pub struct Cli {
    /// Shared secret expected as `Authorization: Bearer <token>`; empty disables auth
    #[arg(long, env = "LOGSHOT_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Address to listen on
    #[arg(long, env = "LOGSHOT_BIND", default_value = "0.0.0.0:9099")]
    pub bind: SocketAddr,

    /// Upper bound on the number of log lines a single request may ask for
    #[arg(
        long,
        env = "MAX_LINES",
        default_value_t = 1000,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub max_lines: i64,

    /// Lines returned when the caller does not pass `n`
    #[arg(
        long,
        env = "DEFAULT_LINES",
        default_value_t = 100,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub default_lines: i64,

    /// Namespace used when a request omits `namespace`
    #[arg(long, env = "DEFAULT_NAMESPACE", default_value = "default")]
    pub default_namespace: String,

    /// Kubeconfig context (defaults to in-cluster config or the current context)
    #[arg(long, env = "LOGSHOT_CONTEXT")]
    pub context: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
