//! Fetch command implementation.
//!
//! Runs the whole flow: reset the logs folder, list and download the
//! device's logs, unpack the archives, merge the fragments and open the
//! merged log in the viewer.

use crate::cli::FetchArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use crate::progress::with_progress;
use crate::viewer;
use anyhow::Result;
use anyhow::bail;
use logpull_core::ExtractConfig;
use logpull_core::MergeReport;
use logpull_core::RemoteConfig;
use logpull_core::Timestamp;
use logpull_core::UnpackReport;
use logpull_core::merge::merge_logcat;
use logpull_core::pipeline::reset_dir;
use logpull_core::pipeline::unpack_all;
use logpull_core::remote::RemoteClient;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a fetch run.
pub struct FetchSummary {
    pub device: String,
    pub since: Timestamp,
    pub listed: usize,
    pub downloaded: Vec<PathBuf>,
    pub unpack: UnpackReport,
    pub merge: MergeReport,
}

pub fn execute(
    args: &FetchArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let device = args.device.trim();
    if device.is_empty() {
        bail!("device id required\nHINT: Pass the device user id with -u <DEVICE_ID>.");
    }

    let since = match &args.date {
        Some(date) => add_context(Timestamp::parse(date), date)?,
        None => Timestamp::now(),
    };

    let logs_dir = &args.logs_dir;
    add_context(reset_dir(logs_dir), &logs_dir.display())?;

    let config = RemoteConfig::new(args.base_url.as_str())
        .with_timeout(Duration::from_secs(args.timeout));
    let client = add_context(RemoteClient::new(&config), &args.base_url)?;
    let device_url = client.device_url(device);

    let logs = add_context(client.list_logs(device, since), &device_url)?;
    if logs.is_empty() {
        formatter.format_warning("No new log files matched on the remote site");
    }

    let downloaded = with_progress(show_progress, "Downloading", |progress| {
        add_context(client.download(&logs, logs_dir, progress), &device_url)
    })?;

    let extract_config = ExtractConfig::default().with_delete_source(true);
    let unpack = with_progress(show_progress, "Unpacking", |progress| {
        add_context(
            unpack_all(logs_dir, &extract_config, progress),
            &logs_dir.display(),
        )
    })?;

    let merge = add_context(merge_logcat(logs_dir), &logs_dir.display())?;

    let summary = FetchSummary {
        device: device.to_owned(),
        since,
        listed: logs.len(),
        downloaded,
        unpack,
        merge,
    };
    formatter.format_fetch_result(&summary)?;

    if !args.no_view {
        match viewer::launch(&args.viewer, &summary.merge.target) {
            Ok(status) if !status.success() => {
                formatter.format_warning(&format!("viewer exited with {status}"));
            }
            Ok(_) => {}
            Err(e) => formatter.format_warning(&format!("{e:#}")),
        }
    }

    Ok(())
}
