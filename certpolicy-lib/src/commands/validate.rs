use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use crate::Result;
use crate::approver::Registry;
use crate::store::{PolicyStore, StaticAuthorizer};
use camino::Utf8Path;
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Load the configuration and reconcile its policies
///
/// Returns one line per policy and the number of policies that are not ready.
fn validate_config_inner(base_dir: &Utf8Path, args: &ValidateArgs) -> Result<(Vec<String>, usize)> {
    let config = Config::load(base_dir, args.common.config.as_ref())?;
    let _ = StaticAuthorizer::new(config.bindings.iter().cloned())?;
    let store = PolicyStore::new(&Registry::new(), config.policies)?;

    let mut lines = Vec::with_capacity(store.policies().len());
    let mut not_ready = 0;
    for policy in store.policies() {
        if policy.status.ready {
            lines.push(format!("✅ {}: ready", policy.name));
        } else {
            not_ready += 1;
            lines.push(format!("❌ {}: {}", policy.name, policy.status.reasons.join("; ")));
        }
    }

    Ok((lines, not_ready))
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let result = validate_config_inner(Utf8Path::new("."), args).and_then(|(lines, not_ready)| {
        for line in &lines {
            let _ = writeln!(host.output(), "{line}");
        }

        if not_ready > 0 {
            return Err(app_err!("{not_ready} of {} policies are not ready", lines.len()));
        }

        Ok(())
    });

    match result {
        Ok(()) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &args.common.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
