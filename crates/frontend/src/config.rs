use std::net::SocketAddr;

use clap::Parser;
use client::notice::DEFAULT_SSH_HOST;

#[derive(Parser, Debug, Clone)]
#[command(name = "gpu-rent-web", version, about = "Web page for reserving GPUs", long_about = None)]
pub struct Args {
    /// Address the page is served on
    #[arg(long, env = "GPU_RENT_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Backend base URL
    #[arg(long, env = "GPU_RENT_API", default_value = "http://127.0.0.1:3001")]
    pub api: String,

    /// Host shown in SSH login hints
    #[arg(long, env = "GPU_RENT_SSH_HOST", default_value = DEFAULT_SSH_HOST)]
    pub ssh_host: String,
}
