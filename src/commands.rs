//! Subcommand implementations. Program output goes to `out`, logs to stderr.

use crate::error::{Error, ErrorKind, Result};
use devbyte_library::{DomainVideo, VideosRepository};
use exn::ResultExt;
use futures::StreamExt;
use std::io::Write;
use std::pin::pin;

pub async fn refresh(repository: &VideosRepository, out: &mut impl Write) -> Result<()> {
    let summary = repository.refresh().await.or_raise(|| ErrorKind::Repository)?;
    writeln!(
        out,
        "fetched {} videos ({} written, {} pruned)",
        summary.fetched, summary.written, summary.pruned
    )
    .or_raise(|| ErrorKind::Output)
}

pub async fn list(repository: &VideosRepository, full: bool, out: &mut impl Write) -> Result<()> {
    let videos = repository.videos().await.or_raise(|| ErrorKind::Repository)?;
    if videos.is_empty() {
        writeln!(out, "no cached videos; run `devbyte refresh` first").or_raise(|| ErrorKind::Output)?;
        return Ok(());
    }
    print_videos(out, &videos, full)
}

/// Print every snapshot of the cache until `shutdown` resolves or the view
/// ends.
pub async fn watch(
    repository: &VideosRepository,
    refresh: bool,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut view = pin!(repository.observe_videos());
    let mut shutdown = pin!(shutdown);
    let refresher = refresh.then(|| {
        let repository = repository.clone();
        tokio::spawn(async move {
            if let Err(err) = repository.refresh().await {
                tracing::error!("refresh failed, showing cached videos: {err:?}");
            }
        })
    });
    let watched = async {
        let mut generation = 0usize;
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                next = view.next() => {
                    let Some(snapshot) = next else { break };
                    let videos = snapshot.or_raise(|| ErrorKind::Repository)?;
                    generation += 1;
                    writeln!(out, "== snapshot {generation}: {} videos ==", videos.len())
                        .or_raise(|| ErrorKind::Output)?;
                    print_videos(out, &videos, false)?;
                    out.flush().or_raise(|| ErrorKind::Output)?;
                }
            }
        }
        Ok::<_, Error>(generation)
    }
    .await;
    if let Some(task) = refresher
        && !task.is_finished()
    {
        tracing::warn!("stopped watching before the refresh finished, abandoning it");
        task.abort();
    }
    let generation = watched?;
    tracing::debug!(snapshots = generation, "stopped watching");
    Ok(())
}

fn print_videos(out: &mut impl Write, videos: &[DomainVideo], full: bool) -> Result<()> {
    for video in videos {
        let description = if full { video.description.clone() } else { video.short_description() };
        writeln!(out, "{}\n  {}\n  {}\n", video.title, video.url, description).or_raise(|| ErrorKind::Output)?;
    }
    Ok(())
}
