//! Command implementations

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::{AppContainer, CaptionRequest, ClipRequest};
use crate::captions;
use crate::cli::args::*;
use crate::cli::Commands;
use crate::domain::model::{MediaInfo, OperationReport, TimeRange, TranscriptionResult};
use crate::utils::Utils;

/// Execute a command that needs the ffmpeg-backed interactors
pub async fn execute(
    command: Commands,
    container: &dyn AppContainer,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        Commands::Probe(args) => probe(args, container, json, cancel).await,
        Commands::Trim(args) => trim(args, container, json, cancel).await,
        Commands::Cut(args) => cut(args, container, json, cancel).await,
        Commands::ExtractAudio(args) => {
            let report = container
                .transcode_interactor()
                .extract_audio(&args.input, &args.output, cancel)
                .await
                .context("Failed to extract audio")?;
            print_report(&report, json)
        }
        Commands::BurnSubtitles(args) => {
            let report = container
                .transcode_interactor()
                .burn_subtitles(&args.input, &args.subtitles, &args.output, cancel)
                .await
                .context("Failed to burn subtitles")?;
            print_report(&report, json)
        }
        Commands::Thumbnail(args) => {
            let report = container
                .transcode_interactor()
                .thumbnail(&args.input, args.at, &args.output, cancel)
                .await
                .context("Failed to create thumbnail")?;
            print_report(&report, json)
        }
        Commands::Transcribe(args) => transcribe(args, container, json, cancel).await,
        Commands::Render(args) => render(args, json),
    }
}

async fn probe(
    args: ProbeArgs,
    container: &dyn AppContainer,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let info = container
        .inspect_interactor()
        .execute(&args.input, cancel)
        .await
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;

    if json {
        print_json(&info)
    } else {
        print_media_info(&info);
        Ok(())
    }
}

async fn trim(
    args: TrimArgs,
    container: &dyn AppContainer,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let range = TimeRange::new(args.start.as_seconds(), args.end.as_seconds())
        .context("Invalid trim range")?;
    let report = container
        .clip_interactor()
        .execute(ClipRequest::trim(args.input, range, args.output), cancel)
        .await
        .context("Failed to trim video")?;
    print_report(&report, json)
}

async fn cut(
    args: CutArgs,
    container: &dyn AppContainer,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let request = ClipRequest {
        input: args.input,
        ranges: args.segments,
        output_name: args.output,
    };
    let report = container
        .clip_interactor()
        .execute(request, cancel)
        .await
        .context("Failed to cut video")?;
    print_report(&report, json)
}

async fn transcribe(
    args: TranscribeArgs,
    container: &dyn AppContainer,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let request = CaptionRequest {
        input: args.input,
        language: args.language,
        srt_name: args.srt,
        vtt_name: args.vtt,
        transcript_name: args.transcript,
        keep_audio: args.keep_audio,
    };
    let response = container
        .caption_interactor()
        .execute(request, cancel)
        .await
        .context("Failed to generate captions")?;

    if json {
        return print_json(&response);
    }
    println!(
        "Transcribed {} segments (language: {})",
        response.transcription.segments.len(),
        response.transcription.language.as_deref().unwrap_or("unknown")
    );
    print_report(&response.report, false)
}

/// Render a stored transcript; needs neither ffmpeg nor the upload directory
pub fn render(args: RenderArgs, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("Failed to read transcript {}", args.transcript.display()))?;
    let transcript: TranscriptionResult = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid transcript {}", args.transcript.display()))?;

    if args.output.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        captions::render(&transcript.segments, args.format, &mut handle)
            .context("Failed to write subtitles to stdout")?;
        return Ok(());
    }

    let started_at = chrono::Utc::now();
    let mut file = std::fs::File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    captions::render(&transcript.segments, args.format, &mut file)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), cues = transcript.segments.len(), "subtitles rendered");

    let report = OperationReport::finish(
        "render",
        vec![args.output.display().to_string()],
        started_at,
    );
    print_report(&report, json)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    Ok(())
}

fn print_report(report: &OperationReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    println!("✓ {} completed in {} ms", report.operation, report.elapsed_ms);
    for output in &report.outputs {
        println!("  {}", output);
    }
    Ok(())
}

fn print_media_info(info: &MediaInfo) {
    println!("Duration:    {:.3}s", info.duration);
    println!("Resolution:  {}x{}", info.width, info.height);
    println!("Frame rate:  {:.3} fps", info.fps);
    println!("Video codec: {}", info.codec);
    match &info.audio_codec {
        Some(codec) => println!("Audio codec: {}", codec),
        None if info.has_audio => println!("Audio codec: unknown"),
        None => println!("Audio:       none"),
    }
    println!("File size:   {}", Utils::format_file_size(info.file_size));
    println!("Bit rate:    {}", Utils::format_bitrate(info.bitrate));
}
