use super::Host;
use super::common::{CommonArgs, build_validator, init_logging};
use super::config::Config;
use crate::Result;
use crate::webhook::{AdmissionRequest, AdmissionResponse, INTERNAL_ERROR_MESSAGE};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::{Read, Write};

#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Admission request JSON to review, or `-` to read it from standard input
    #[arg(long, value_name = "PATH")]
    pub request: Utf8PathBuf,

    /// Exit with status code 1 if the request is not allowed
    #[arg(long)]
    pub error_if_denied: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn review_request<H: Host>(host: &mut H, args: &ReviewArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let admission = match AdmissionRequest::from_json(&read_request(&args.request)?) {
        Ok(admission) => admission,
        Err(e) => {
            // an undecodable request still gets a refusal
            let _ = writeln!(host.output(), "{}", AdmissionResponse::denied("", INTERNAL_ERROR_MESSAGE).to_json()?);
            return Err(e);
        }
    };

    let validator = build_validator(&config)?;
    validator.check()?;

    let response = validator.handle(&admission).await;
    let _ = writeln!(host.output(), "{}", response.to_json()?);

    if args.error_if_denied && !response.allowed {
        bail!("request '{}' was not allowed", admission.uid);
    }

    Ok(())
}

fn read_request(path: &Utf8Path) -> Result<String> {
    if path.as_str() == "-" {
        let mut text = String::new();
        let _ = std::io::stdin()
            .read_to_string(&mut text)
            .into_app_err("reading admission request from standard input")?;
        return Ok(text);
    }

    fs::read_to_string(path).into_app_err_with(|| format!("reading admission request '{path}'"))
}
