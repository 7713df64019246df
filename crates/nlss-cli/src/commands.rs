use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use nlss_sdk::{NlssConfig, Signature};
use tracing::warn;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = NlssConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Reconstruct(args) => cmd_reconstruct(args),
        Command::BreakNlss(args) => cmd_break_nlss(&config, args),
        Command::Sign(args) => cmd_sign(&config, args),
        Command::Verify(args) => cmd_verify(&config, args),
    }
}

fn cmd_reconstruct(args: ReconstructArgs) -> anyhow::Result<()> {
    nlss_sdk::reconstruct_private_share(&args.did, &args.public, &args.output)?;
    println!(
        "{} Private share written to {}",
        "✓".green().bold(),
        args.output.display().to_string().bold()
    );
    Ok(())
}

fn cmd_break_nlss(config: &NlssConfig, args: BreakNlssArgs) -> anyhow::Result<()> {
    let dids = resolve_dids(&args.did)?;
    if dids.is_empty() {
        bail!("no DIDs found in {}", args.did);
    }

    let mut failed = 0usize;
    for did in &dids {
        match nlss_sdk::reconstruct_for_did(config, did) {
            Ok(path) => println!(
                "{} {} → {}",
                "✓".green().bold(),
                did.yellow(),
                path.display()
            ),
            Err(e) => {
                failed += 1;
                warn!(did = %did, error = %e, "reconstruction failed");
                println!("{} {}: {}", "✗".red().bold(), did.yellow(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} DIDs failed", dids.len());
    }
    println!("Reconstructed {} private share(s).", dids.len().to_string().bold());
    Ok(())
}

fn cmd_sign(config: &NlssConfig, args: SignArgs) -> anyhow::Result<()> {
    let image = args.image.unwrap_or_else(|| config.preset_private_share());
    let signature = nlss_sdk::sign_private_share(&image, &args.hash)
        .with_context(|| format!("signing with {}", image.display()))?;
    println!("{signature}");
    Ok(())
}

fn cmd_verify(config: &NlssConfig, args: VerifyArgs) -> anyhow::Result<()> {
    let signature: Signature = args.signature.parse().context("parsing signature")?;
    let did = args.did.unwrap_or_else(|| config.preset_did_image());
    let public = args.public.unwrap_or_else(|| config.preset_public_share());
    nlss_sdk::verify_signature(&did, &public, &args.hash, &signature)?;
    println!("{} Signature valid", "✓".green().bold());
    Ok(())
}

/// A path to an existing file is read as a DID list; anything else is a DID.
fn resolve_dids(arg: &str) -> anyhow::Result<Vec<String>> {
    let path = Path::new(arg);
    if path.is_file() {
        let dids = nlss_sdk::read_did_list(path)
            .with_context(|| format!("reading DID list {arg}"))?;
        Ok(dids)
    } else {
        Ok(vec![arg.trim().to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_did_argument() {
        assert_eq!(resolve_dids("bafyDid").unwrap(), vec!["bafyDid".to_string()]);
    }

    #[test]
    fn did_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dids.txt");
        std::fs::write(&path, "# batch\nbafyA\n\nbafyB\n").unwrap();
        let dids = resolve_dids(path.to_str().unwrap()).unwrap();
        assert_eq!(dids, vec!["bafyA".to_string(), "bafyB".to_string()]);
    }

    #[test]
    fn batch_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = NlssConfig {
            base_path: Some(dir.path().to_path_buf()),
            node_name: Some("node".into()),
            output_dir: dir.path().join("out"),
            ..NlssConfig::default()
        };
        let args = BreakNlssArgs { did: "bafyMissing".into() };
        let err = cmd_break_nlss(&config, args).unwrap_err();
        assert!(err.to_string().contains("1 of 1"));
    }
}
