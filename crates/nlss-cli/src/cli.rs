use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "break-nlss",
    about = "Reconstruct, sign with, and verify NLSS private shares",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file; environment variables override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconstruct a private share from explicit image paths
    Reconstruct(ReconstructArgs),
    /// Reconstruct private shares for DIDs in the node layout
    BreakNlss(BreakNlssArgs),
    /// Sign a transaction hash with a private share image
    Sign(SignArgs),
    /// Verify a signature against DID and public share images
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct ReconstructArgs {
    /// DID image
    #[arg(long)]
    pub did: PathBuf,
    /// Public share image
    #[arg(long)]
    pub public: PathBuf,
    /// Where to write the private share PNG
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct BreakNlssArgs {
    /// A DID, or a file listing one DID per line
    #[arg(long)]
    pub did: String,
}

#[derive(Args)]
pub struct SignArgs {
    /// Hex transaction hash
    pub hash: String,
    /// Private share image; defaults to the preset private share
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Hex transaction hash
    pub hash: String,
    /// Hex signature
    pub signature: String,
    /// DID image; defaults to the preset DID image
    #[arg(long)]
    pub did: Option<PathBuf>,
    /// Public share image; defaults to the preset public share
    #[arg(long)]
    pub public: Option<PathBuf>,
}
